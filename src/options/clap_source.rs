use super::{
    DefaultValue, OptionDescriptor, OptionGroup, OptionKind, OptionSource, ParseRejected,
    ParsedResult, ParsedValue, ValueType,
};
use clap::{Arg, ArgAction, Command};
use std::any::TypeId;

/// Title of the group holding arguments that declare no help heading.
pub const DEFAULT_GROUP_TITLE: &str = "Options";

/// Option source backed by a `clap::Command`.
///
/// Groups follow the command's help headings, with unheaded arguments first.
/// Parsing replays the assembled arguments through clap itself.
#[derive(Debug, Clone)]
pub struct ClapSource {
    command: Command,
    groups: Vec<OptionGroup>,
}

impl ClapSource {
    pub fn new(mut command: Command) -> ClapSource {
        // fills in generated help/version args and flag defaults
        command.build();

        let mut groups = vec![OptionGroup::new(DEFAULT_GROUP_TITLE)];
        for arg in command.get_arguments() {
            let title = arg.get_help_heading().unwrap_or(DEFAULT_GROUP_TITLE);
            let index = match groups.iter().position(|g| g.title == title) {
                Some(index) => index,
                None => {
                    groups.push(OptionGroup::new(title));
                    groups.len() - 1
                }
            };
            groups[index].add_option(describe(arg));
        }
        groups.retain(|g| !g.options.is_empty());

        ClapSource { command, groups }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

impl From<Command> for ClapSource {
    fn from(command: Command) -> Self {
        ClapSource::new(command)
    }
}

impl OptionSource for ClapSource {
    fn groups(&self) -> Vec<OptionGroup> {
        self.groups.clone()
    }

    fn parse(&self, arguments: &[String]) -> Result<ParsedResult, ParseRejected> {
        let argv = std::iter::once(self.command.get_name().to_string())
            .chain(arguments.iter().cloned());
        let matches = self
            .command
            .clone()
            .try_get_matches_from(argv)
            .map_err(|e| ParseRejected::new(first_line(&e.to_string())))?;

        let mut result = ParsedResult::default();
        for option in self.groups.iter().flat_map(|g| g.options.iter()) {
            match option.kind {
                OptionKind::BooleanTrue | OptionKind::BooleanFalse => {
                    let value = matches
                        .try_get_one::<bool>(&option.dest)
                        .map_err(|e| ParseRejected::new(e.to_string()))?;
                    if let Some(value) = value {
                        result.insert(&option.dest, ParsedValue::Bool(*value));
                    }
                }
                OptionKind::ValueTaking => {
                    let raw = matches
                        .try_get_raw(&option.dest)
                        .map_err(|e| ParseRejected::new(e.to_string()))?;
                    if let Some(text) = raw.and_then(|mut values| values.next()) {
                        let value =
                            ParsedValue::from_text(&text.to_string_lossy(), option.value_type)?;
                        result.insert(&option.dest, value);
                    }
                }
                OptionKind::NoOp | OptionKind::Unsupported(_) => {}
            }
        }

        Ok(result)
    }
}

fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

/// Translate one clap argument into a descriptor.
fn describe(arg: &Arg) -> OptionDescriptor {
    let kind = if arg.is_positional() {
        OptionKind::Unsupported("positional".to_string())
    } else {
        match arg.get_action() {
            ArgAction::SetTrue => OptionKind::BooleanTrue,
            ArgAction::SetFalse => OptionKind::BooleanFalse,
            ArgAction::Set => OptionKind::ValueTaking,
            ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version => {
                OptionKind::NoOp
            }
            other => OptionKind::Unsupported(format!("{other:?}")),
        }
    };

    let mut forms = Vec::new();
    if let Some(short) = arg.get_short() {
        forms.push(format!("-{short}"));
    }
    if let Some(long) = arg.get_long() {
        forms.push(format!("--{long}"));
    }

    let default_value = arg.get_default_values().first().map(|value| {
        let value = value.to_string_lossy().to_string();
        match (&kind, value.as_str()) {
            (k, "true") if k.is_flag() => DefaultValue::Bool(true),
            (k, "false") if k.is_flag() => DefaultValue::Bool(false),
            _ => DefaultValue::Text(value),
        }
    });

    OptionDescriptor {
        dest: arg.get_id().as_str().to_string(),
        value_type: value_type_of(arg),
        kind,
        forms,
        default_value,
        help: arg.get_help().map(ToString::to_string),
    }
}

/// Infer the declared value type from the argument's value parser.
fn value_type_of(arg: &Arg) -> ValueType {
    let id = arg.get_value_parser().type_id();

    let integers = [
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
    ];
    let floats = [TypeId::of::<f32>(), TypeId::of::<f64>()];

    if integers.iter().any(|t| id == *t) {
        ValueType::Integer
    } else if floats.iter().any(|t| id == *t) {
        ValueType::Float
    } else {
        ValueType::String
    }
}
