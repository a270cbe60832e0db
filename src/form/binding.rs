use super::filter::{Acceptance, InputFilter};
use crate::options::{DefaultValue, InitialValue, OptionDescriptor, OptionKind};
use std::fmt;

/// Index of a control within its dialog.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControlId(pub usize);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a control currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    /// A flag checkbox; `checked` is the value the destination takes
    Flag { checked: bool },
    /// A value field with its own enable toggle
    Text {
        enabled: bool,
        text: String,
        filter: Option<InputFilter>,
    },
}

/// Live pairing of one option with its control state.
#[derive(Debug, Clone)]
pub struct ControlBinding {
    pub option: OptionDescriptor,
    pub value: ControlValue,
    /// Set when the last parse rejected an edit made through this control
    pub flagged: bool,
}

impl ControlBinding {
    /// Bind a flag or value option, seeding it from `initial` first and the
    /// declared default second. Other kinds have no control.
    pub(crate) fn new(option: OptionDescriptor, initial: Option<&InitialValue>) -> Option<Self> {
        let value = match option.kind {
            OptionKind::BooleanTrue | OptionKind::BooleanFalse => {
                let checked = match (initial, &option.default_value) {
                    (Some(initial), _) => initial.as_bool(),
                    (None, Some(DefaultValue::Bool(b))) => *b,
                    (None, Some(DefaultValue::Text(t))) => t == "true",
                    // a false-flag defaults to true
                    (None, None) => option.kind == OptionKind::BooleanFalse,
                };
                ControlValue::Flag { checked }
            }
            OptionKind::ValueTaking => {
                let default = option.default_value.as_ref().filter(|d| !d.is_empty());
                let (enabled, text) = match (initial, default) {
                    (Some(initial), _) => (true, initial.to_string()),
                    (None, Some(default)) => (true, default.to_string()),
                    (None, None) => (false, String::new()),
                };
                ControlValue::Text {
                    enabled,
                    text,
                    filter: InputFilter::for_type(option.value_type),
                }
            }
            OptionKind::NoOp | OptionKind::Unsupported(_) => return None,
        };

        Some(ControlBinding {
            option,
            value,
            flagged: false,
        })
    }

    pub fn dest(&self) -> &str {
        &self.option.dest
    }

    /// Whether this binding contributes tokens to the argument list.
    ///
    /// A false-flag is emitted when its box is unchecked, since emitting it is
    /// what makes the destination false.
    pub fn is_active(&self) -> bool {
        match &self.value {
            ControlValue::Flag { checked } => match self.option.kind {
                OptionKind::BooleanFalse => !checked,
                _ => *checked,
            },
            ControlValue::Text { enabled, .. } => *enabled,
        }
    }

    /// The filter's verdict on the current text; flags are always acceptable
    pub fn acceptance(&self) -> Acceptance {
        match &self.value {
            ControlValue::Text {
                text,
                filter: Some(filter),
                ..
            } => filter.check(text),
            _ => Acceptance::Acceptable,
        }
    }

    /// Tokens this binding contributes when active
    pub fn tokens(&self) -> Vec<String> {
        let Some(invocation) = self.option.invocation() else {
            return Vec::new();
        };
        match &self.value {
            ControlValue::Flag { .. } => vec![invocation.to_string()],
            ControlValue::Text { text, .. } => vec![invocation.to_string(), text.clone()],
        }
    }

    /// Label shown next to the toggle
    pub fn label(&self) -> &str {
        &self.option.dest
    }
}
