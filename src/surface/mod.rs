//! Presentation surfaces: whatever shows a form and turns user actions into events.
//!
//! A surface owns the event loop. [`run_dialog`] asks it for one event at a time
//! and dispatches each one into the dialog until the dialog is accepted or
//! cancelled.

use crate::form::{ControlId, DialogState, FormDialog};
use crate::options::OptionSource;
use anyhow::Result;

mod scripted;
pub use scripted::*;

mod terminal;
pub use terminal::*;

/// A user action on a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Check or uncheck a flag, or enable or disable a value field
    Toggle(ControlId, bool),
    /// Replace the text of a value field
    Edit(ControlId, String),
    Accept,
    Cancel,
}

pub trait Surface {
    /// Show the dialog's current state and wait for the next user action.
    fn next_event<S: OptionSource>(&mut self, dialog: &FormDialog<S>) -> Result<FormEvent>;
}

/// Drive a dialog with events from a surface until it is accepted or cancelled.
pub fn run_dialog<S: OptionSource, U: Surface>(
    dialog: &mut FormDialog<S>,
    surface: &mut U,
) -> Result<DialogState> {
    while !dialog.state().is_terminal() {
        let event = surface.next_event(dialog)?;
        log::debug!("dispatching {event:?}");
        dialog.handle(event)?;
    }
    Ok(dialog.state())
}
