use crate::form::{ControlId, DialogState};
use thiserror::Error;

/// Errors raised by a form dialog.
///
/// Rejected parses and half-typed numbers are not errors; the dialog absorbs
/// them and reports them through its status instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("option '{dest}' uses the '{action}' action, which the form cannot render")]
    UnsupportedOptionKind { dest: String, action: String },

    #[error("the dialog was already {0}")]
    Closed(DialogState),

    #[error("no control {0} in this dialog")]
    UnknownControl(ControlId),

    #[error("'{0}' is a flag and holds no text")]
    NotAValueControl(String),
}
