use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of control an option needs, decided once when the option source is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// A flag that sets its destination to `true` when present
    BooleanTrue,
    /// A flag that sets its destination to `false` when present
    BooleanFalse,
    /// An option followed by a single value
    ValueTaking,
    /// Help, version and similar options that never get a control
    NoOp,
    /// Anything else the parser declares; carries the parser's name for the action
    Unsupported(String),
}

impl OptionKind {
    pub fn is_flag(&self) -> bool {
        matches!(self, OptionKind::BooleanTrue | OptionKind::BooleanFalse)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Float,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
        };
        write!(f, "{name}")
    }
}

/// A declared default, as the parser reports it.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Text(String),
}

impl DefaultValue {
    /// Whether this default should leave a value control enabled at build time
    pub fn is_empty(&self) -> bool {
        match self {
            DefaultValue::Bool(b) => !b,
            DefaultValue::Text(t) => t.is_empty(),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Bool(b) => write!(f, "{b}"),
            DefaultValue::Text(t) => write!(f, "{t}"),
        }
    }
}

/// One declared command-line option.
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(setter(into))]
pub struct OptionDescriptor {
    /// Stable identifier the parsed result is keyed by
    pub dest: String,
    pub kind: OptionKind,
    #[builder(default)]
    pub value_type: ValueType,
    /// Spellings the option can be invoked with, e.g. `-v` then `--verbose`
    #[builder(setter(each(name = "form", into)), default)]
    pub forms: Vec<String>,
    #[builder(setter(into, strip_option), default)]
    pub default_value: Option<DefaultValue>,
    #[builder(setter(into, strip_option), default)]
    pub help: Option<String>,
}

impl OptionDescriptor {
    /// The spelling used when assembling a command line: the last declared form,
    /// which is the long spelling when there is one.
    pub fn invocation(&self) -> Option<&str> {
        self.forms.last().map(String::as_str)
    }
}

/// A titled collection of options presented together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionGroup {
    pub title: String,
    pub options: Vec<OptionDescriptor>,
}

impl OptionGroup {
    pub fn new<S: ToString>(title: S) -> OptionGroup {
        OptionGroup {
            title: title.to_string(),
            options: Vec::default(),
        }
    }

    pub fn add_option(&mut self, option: OptionDescriptor) -> &mut Self {
        self.options.push(option);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_build_descriptor_with_builder_pattern() {
        let option = OptionDescriptorBuilder::default()
            .dest("count")
            .kind(OptionKind::ValueTaking)
            .value_type(ValueType::Integer)
            .form("-c")
            .form("--count")
            .default_value(DefaultValue::Text("3".to_string()))
            .build()
            .expect("can build descriptor");

        assert_eq!(option.forms, vec!["-c".to_string(), "--count".to_string()]);
        assert_eq!(option.invocation(), Some("--count"));
        assert_eq!(option.help, None);
    }

    #[test]
    fn descriptor_without_forms_has_no_invocation() {
        let option = OptionDescriptorBuilder::default()
            .dest("input")
            .kind(OptionKind::ValueTaking)
            .build()
            .expect("can build descriptor");
        assert_eq!(option.invocation(), None);
    }

    #[test]
    fn empty_defaults_are_detected() {
        assert!(DefaultValue::Text(String::new()).is_empty());
        assert!(DefaultValue::Bool(false).is_empty());
        assert!(!DefaultValue::Text("0".to_string()).is_empty());
    }
}
