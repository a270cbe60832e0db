use super::{FormEvent, Surface};
use crate::form::FormDialog;
use crate::options::OptionSource;
use anyhow::{anyhow, Result};
use std::collections::VecDeque;

/// A surface that replays a fixed list of events.
///
/// Useful wherever a form has to be driven without a user, e.g. in tests.
/// Running out of events is an error, since the dialog would otherwise wait forever.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    events: VecDeque<FormEvent>,
    /// Preview text as seen before each event was handed out
    pub seen_previews: Vec<String>,
}

impl ScriptedSurface {
    pub fn new<I: IntoIterator<Item = FormEvent>>(events: I) -> ScriptedSurface {
        ScriptedSurface {
            events: events.into_iter().collect(),
            seen_previews: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl Surface for ScriptedSurface {
    fn next_event<S: OptionSource>(&mut self, dialog: &FormDialog<S>) -> Result<FormEvent> {
        self.seen_previews.push(dialog.preview().to_string());
        self.events
            .pop_front()
            .ok_or_else(|| anyhow!("Scripted surface ran out of events"))
    }
}
