//! The form synchronizer.
//!
//! A [`FormDialog`] owns one [`ControlBinding`] per bindable option and keeps three
//! derived things in step with them: the flat argument list, its one-line preview,
//! and the most recent successful parse of that list by the option source.
//!
//! Every edit triggers a full recompute. A recompute pauses (leaving the argument
//! list and preview as they were) while an enabled numeric field holds text its
//! filter does not accept, and a parse the source rejects leaves the previous
//! result in place and flags the control that was edited last.

use crate::error::FormError;
use crate::options::{InitialArguments, OptionKind, OptionSource, ParseRejected, ParsedResult};
use crate::surface::FormEvent;
use derive_builder::Builder;
use log::{debug, warn};
use std::collections::HashSet;
use std::fmt;

mod binding;
pub use binding::*;

mod filter;
pub use filter::*;

mod layout;
pub use layout::*;

mod preview;
pub use preview::*;


/// What to do with an option the form has no control for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Log a warning and leave the option out of the form
    #[default]
    Skip,
    /// Fail the build
    Abort,
}

#[derive(Builder, Debug, Clone)]
#[builder(setter(into))]
pub struct FormOptions {
    /// Grid columns per group
    #[builder(default = "3")]
    pub columns: usize,
    /// Values that take precedence over declared defaults
    #[builder(default)]
    pub initial: InitialArguments,
    #[builder(default)]
    pub unsupported: UnsupportedPolicy,
}

impl Default for FormOptions {
    fn default() -> Self {
        FormOptions {
            columns: 3,
            initial: InitialArguments::default(),
            unsupported: UnsupportedPolicy::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DialogState {
    /// Open and accepting edits
    Ready,
    Accepted,
    Cancelled,
}

impl DialogState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, DialogState::Ready)
    }
}

impl fmt::Display for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogState::Ready => "ready",
            DialogState::Accepted => "accepted",
            DialogState::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

/// Outcome of the most recent completed recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStatus {
    Ok,
    Rejected(ParseRejected),
}

/// What a single recompute did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The argument list was rebuilt and parsed successfully
    Parsed,
    /// The argument list was rebuilt but the source refused it
    Rejected(ParseRejected),
    /// An enabled field holds text its filter does not accept; nothing changed
    InvalidFieldInput { control: ControlId },
}

/// How a dialog ended, handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Accepted {
        result: ParsedResult,
        arguments: Vec<String>,
    },
    Cancelled,
    /// The dialog was dropped while still open
    Open,
}

/// One live form built from an option source.
#[derive(Debug)]
pub struct FormDialog<S> {
    source: S,
    bindings: Vec<ControlBinding>,
    groups: Vec<GroupLayout>,
    arguments: Vec<String>,
    preview: String,
    result: Option<ParsedResult>,
    status: ParseStatus,
    state: DialogState,
    last_edited: Option<ControlId>,
    incomplete: Option<ControlId>,
}

/// Build a dialog with the given initial values and grid width.
pub fn build<S: OptionSource>(
    source: S,
    initial: Option<InitialArguments>,
    columns: usize,
) -> Result<FormDialog<S>, FormError> {
    FormDialog::build(
        source,
        FormOptions {
            columns,
            initial: initial.unwrap_or_default(),
            ..FormOptions::default()
        },
    )
}

impl<S: OptionSource> FormDialog<S> {
    /// Enumerate the source once and bind every option that can have a control.
    ///
    /// The first option to claim an identifier wins; later options with the same
    /// identifier are skipped. Groups left without controls are not laid out.
    pub fn build(source: S, options: FormOptions) -> Result<FormDialog<S>, FormError> {
        let mut claimed: HashSet<String> = HashSet::new();
        let mut bindings: Vec<ControlBinding> = Vec::new();
        let mut groups: Vec<GroupLayout> = Vec::new();

        for group in source.groups() {
            let mut controls = Vec::new();

            for option in group.options {
                if claimed.contains(&option.dest) {
                    debug!("'{}' is already bound, skipping duplicate", option.dest);
                    continue;
                }

                let action = match &option.kind {
                    OptionKind::Unsupported(action) => Some(action.clone()),
                    OptionKind::NoOp => None,
                    _ if option.forms.is_empty() => Some("positional".to_string()),
                    _ => None,
                };
                if let Some(action) = action {
                    let error = FormError::UnsupportedOptionKind {
                        dest: option.dest.clone(),
                        action,
                    };
                    match options.unsupported {
                        UnsupportedPolicy::Abort => return Err(error),
                        UnsupportedPolicy::Skip => {
                            warn!("{error}; leaving it out of the form");
                            continue;
                        }
                    }
                }

                let dest = option.dest.clone();
                let initial = options.initial.get(&dest);
                if let Some(binding) = ControlBinding::new(option, initial) {
                    controls.push(ControlId(bindings.len()));
                    bindings.push(binding);
                    claimed.insert(dest);
                }
            }

            if controls.is_empty() {
                debug!("group '{}' has no controls, omitting it", group.title);
                continue;
            }
            groups.push(GroupLayout::new(group.title, &controls, options.columns));
        }

        let mut dialog = FormDialog {
            source,
            bindings,
            groups,
            arguments: Vec::new(),
            preview: String::new(),
            result: None,
            status: ParseStatus::Ok,
            state: DialogState::Ready,
            last_edited: None,
            incomplete: None,
        };
        dialog.update();
        Ok(dialog)
    }

    /// Rebuild the argument list and preview from the bindings and re-parse it.
    pub fn update(&mut self) -> UpdateOutcome {
        let mut arguments = Vec::new();
        for (index, binding) in self.bindings.iter().enumerate() {
            if !binding.is_active() {
                continue;
            }
            if !binding.acceptance().is_acceptable() {
                debug!("'{}' holds incomplete input, pausing", binding.dest());
                self.incomplete = Some(ControlId(index));
                return UpdateOutcome::InvalidFieldInput {
                    control: ControlId(index),
                };
            }
            arguments.extend(binding.tokens());
        }

        self.incomplete = None;
        self.preview = render_preview(&arguments);
        self.arguments = arguments;
        debug!("command line is now: {}", self.preview);

        match self.source.parse(&self.arguments) {
            Ok(result) => {
                for binding in &mut self.bindings {
                    binding.flagged = false;
                }
                self.result = Some(result);
                self.status = ParseStatus::Ok;
                UpdateOutcome::Parsed
            }
            Err(rejected) => {
                debug!("{rejected}");
                for (index, binding) in self.bindings.iter_mut().enumerate() {
                    binding.flagged = self.last_edited == Some(ControlId(index));
                }
                self.status = ParseStatus::Rejected(rejected.clone());
                UpdateOutcome::Rejected(rejected)
            }
        }
    }

    /// Switch a flag on or off, or enable/disable a value field.
    pub fn toggle(&mut self, id: ControlId, on: bool) -> Result<UpdateOutcome, FormError> {
        self.ensure_open()?;
        let binding = self.binding_mut(id)?;
        match &mut binding.value {
            ControlValue::Flag { checked } => *checked = on,
            ControlValue::Text { enabled, .. } => *enabled = on,
        }
        self.last_edited = Some(id);
        Ok(self.update())
    }

    /// Replace the text of a value field.
    pub fn edit<T: Into<String>>(
        &mut self,
        id: ControlId,
        text: T,
    ) -> Result<UpdateOutcome, FormError> {
        self.ensure_open()?;
        let binding = self.binding_mut(id)?;
        if binding.option.kind.is_flag() {
            return Err(FormError::NotAValueControl(binding.dest().to_string()));
        }
        if let ControlValue::Text { text: current, .. } = &mut binding.value {
            *current = text.into();
        }
        self.last_edited = Some(id);
        Ok(self.update())
    }

    /// Recompute once more and accept if that recompute parsed cleanly.
    ///
    /// Returns whether the dialog was accepted; a refused confirmation leaves it open.
    pub fn confirm(&mut self) -> Result<bool, FormError> {
        self.ensure_open()?;
        match self.update() {
            UpdateOutcome::Parsed => {
                self.state = DialogState::Accepted;
                Ok(true)
            }
            outcome => {
                debug!("not accepting: {outcome:?}");
                Ok(false)
            }
        }
    }

    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        self.state = DialogState::Cancelled;
        Ok(())
    }

    /// Dispatch one event from a presentation surface.
    pub fn handle(&mut self, event: FormEvent) -> Result<DialogState, FormError> {
        match event {
            FormEvent::Toggle(id, on) => {
                self.toggle(id, on)?;
            }
            FormEvent::Edit(id, text) => {
                self.edit(id, text)?;
            }
            FormEvent::Accept => {
                self.confirm()?;
            }
            FormEvent::Cancel => self.cancel()?,
        }
        Ok(self.state)
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.state.is_terminal() {
            Err(FormError::Closed(self.state))
        } else {
            Ok(())
        }
    }

    fn binding_mut(&mut self, id: ControlId) -> Result<&mut ControlBinding, FormError> {
        self.bindings
            .get_mut(id.0)
            .ok_or(FormError::UnknownControl(id))
    }
}

impl<S> FormDialog<S> {
    pub fn bindings(&self) -> &[ControlBinding] {
        &self.bindings
    }

    pub fn binding(&self, id: ControlId) -> Option<&ControlBinding> {
        self.bindings.get(id.0)
    }

    /// Find the control bound to an option identifier
    pub fn control(&self, dest: &str) -> Option<ControlId> {
        self.bindings
            .iter()
            .position(|b| b.dest() == dest)
            .map(ControlId)
    }

    /// Visible groups, in presentation order
    pub fn groups(&self) -> &[GroupLayout] {
        &self.groups
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The read-only command line preview
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// The most recent successful parse, if any
    pub fn result(&self) -> Option<&ParsedResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> &ParseStatus {
        &self.status
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn last_edited(&self) -> Option<ControlId> {
        self.last_edited
    }

    /// The enabled field whose input is currently holding recomputes back
    pub fn incomplete(&self) -> Option<ControlId> {
        self.incomplete
    }

    pub fn into_outcome(self) -> DialogOutcome {
        match (self.state, self.result) {
            (DialogState::Accepted, Some(result)) => DialogOutcome::Accepted {
                result,
                arguments: self.arguments,
            },
            (DialogState::Cancelled, _) => DialogOutcome::Cancelled,
            _ => DialogOutcome::Open,
        }
    }
}
