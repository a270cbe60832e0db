//! File-based parser descriptions.
//!
//! Lets the binary drive a form for a tool it knows nothing about: the tool's
//! options are written down in TOML, turned into a `clap::Command`, and from then
//! on treated exactly like any other [`ClapSource`](super::ClapSource).
//!
//! ```toml
//! name = "mytool"
//!
//! [[group]]
//! title = "Output"
//!
//! [[group.option]]
//! id = "verbose"
//! kind = "flag"
//! long = "verbose"
//! short = "v"
//! help = "Talk more"
//! ```

use super::ValueType;
use anyhow::{anyhow, Context, Result};
use clap::builder::ValueParser;
use clap::{value_parser, Arg, ArgAction, Command};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescribedKind {
    /// Presence sets the destination to `true`
    Flag,
    /// Presence sets the destination to `false`
    NegatedFlag,
    /// Takes one value
    Value,
    /// Prints help; never gets a control
    Help,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribedOption {
    pub id: String,
    pub kind: DescribedKind,
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub short: Option<char>,
    #[serde(default, rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    /// Inclusive lower bound for integer values
    #[serde(default)]
    pub min: Option<i64>,
    /// Inclusive upper bound for integer values
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub conflicts_with: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribedGroup {
    pub title: String,
    #[serde(default, rename = "option")]
    pub options: Vec<DescribedOption>,
}

/// A whole command, as written in a description file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserDescription {
    pub name: String,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default, rename = "group")]
    pub groups: Vec<DescribedGroup>,
}

impl ParserDescription {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ParserDescription> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load description {}", path.display()))?;
        ParserDescription::from_toml(&contents)
            .with_context(|| format!("Failed to parse description {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<ParserDescription> {
        toml::from_str(contents).with_context(|| "Failed to parse TOML")
    }

    /// Build the equivalent clap command.
    ///
    /// Clap's generated `--help` is disabled so that a described help option
    /// does not collide with it; an undescribed command therefore has no help.
    pub fn to_command(&self) -> Result<Command> {
        let mut command = Command::new(self.name.clone())
            .disable_help_flag(true)
            .disable_version_flag(true);
        if let Some(about) = &self.about {
            command = command.about(about.clone());
        }

        for group in &self.groups {
            for option in &group.options {
                let arg = option
                    .to_arg()
                    .with_context(|| format!("Invalid option '{}'", option.id))?
                    .help_heading(group.title.clone());
                command = command.arg(arg);
            }
        }

        Ok(command)
    }
}

impl DescribedOption {
    fn to_arg(&self) -> Result<Arg> {
        if self.long.is_none() && self.short.is_none() {
            return Err(anyhow!("needs a long or short spelling"));
        }
        if (self.min.is_some() || self.max.is_some()) && self.value_type != ValueType::Integer {
            return Err(anyhow!("min and max only apply to integer options"));
        }

        let mut arg = Arg::new(self.id.clone());
        if let Some(long) = &self.long {
            arg = arg.long(long.clone());
        }
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if let Some(help) = &self.help {
            arg = arg.help(help.clone());
        }

        arg = match self.kind {
            DescribedKind::Flag => arg.action(ArgAction::SetTrue),
            DescribedKind::NegatedFlag => arg.action(ArgAction::SetFalse),
            DescribedKind::Help => arg.action(ArgAction::Help),
            DescribedKind::Value => {
                // values like `-5` or `-x` arrive as their own token after the option
                let mut arg = arg
                    .action(ArgAction::Set)
                    .allow_hyphen_values(true)
                    .value_parser(self.value_parser());
                if let Some(default) = &self.default {
                    arg = arg.default_value(default.clone());
                }
                arg.required(self.required)
            }
        };

        if !self.conflicts_with.is_empty() {
            arg = arg.conflicts_with_all(self.conflicts_with.clone());
        }

        Ok(arg)
    }

    fn value_parser(&self) -> ValueParser {
        match self.value_type {
            ValueType::String => ValueParser::string(),
            ValueType::Float => value_parser!(f64).into(),
            ValueType::Integer => match (self.min, self.max) {
                (Some(min), Some(max)) => value_parser!(i64).range(min..=max).into(),
                (Some(min), None) => value_parser!(i64).range(min..).into(),
                (None, Some(max)) => value_parser!(i64).range(..=max).into(),
                (None, None) => value_parser!(i64).into(),
            },
        }
    }
}
