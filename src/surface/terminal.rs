//! Interactive terminal surface.
//!
//! Each round prints the command line preview, the latest parse problem (if any)
//! and the option grid, then offers a fuzzy-searchable menu of controls. Picking
//! a flag flips it; picking a value field lets the user edit, enable or disable it.

use super::{FormEvent, Surface};
use crate::form::{
    Acceptance, ControlBinding, ControlId, ControlValue, FormDialog, ParseStatus,
};
use crate::options::OptionSource;
use anyhow::{Context, Result};
use console::{pad_str, style, Alignment, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input, Select};
use std::collections::VecDeque;

enum MenuEntry {
    Control(ControlId),
    Accept,
    Cancel,
}

#[derive(Debug, PartialEq, Eq)]
enum ValueAction {
    Edit,
    Disable,
}

const VALUE_ACTIONS: [&str; 2] = ["Edit value", "Disable"];

/// Map a pick from the value field submenu; `None` means it was dismissed.
fn value_action(choice: Option<usize>) -> Option<ValueAction> {
    match choice? {
        0 => Some(ValueAction::Edit),
        _ => Some(ValueAction::Disable),
    }
}

pub struct TerminalSurface {
    theme: ColorfulTheme,
    term: Term,
    queued: VecDeque<FormEvent>,
    cursor: usize,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        TerminalSurface {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
            queued: VecDeque::new(),
            cursor: 0,
        }
    }
}

impl TerminalSurface {
    pub fn new() -> TerminalSurface {
        TerminalSurface::default()
    }

    fn render<S>(&self, dialog: &FormDialog<S>) -> Result<()> {
        let term = &self.term;
        term.write_line("")?;
        term.write_line(&format!(
            "{} {}",
            style("Command line:").bold(),
            style(dialog.preview()).cyan()
        ))?;

        if let Some(binding) = dialog.incomplete().and_then(|id| dialog.binding(id)) {
            term.write_line(&format!(
                "{} '{}' needs a complete value, the command line is not updated",
                style("Incomplete:").yellow(),
                binding.label()
            ))?;
        } else if let ParseStatus::Rejected(rejected) = dialog.status() {
            term.write_line(&format!(
                "{} {}",
                style("Rejected:").red(),
                rejected.message
            ))?;
        }

        let (_, width) = term.size();
        for group in dialog.groups() {
            let columns = group.rows.first().map(Vec::len).unwrap_or(1).max(1);
            let cell_width = (width as usize / columns).saturating_sub(1).max(8);

            term.write_line(&format!("{}", style(&group.title).bold().underlined()))?;
            for row in &group.rows {
                let cells: Vec<String> = row
                    .iter()
                    .filter_map(|&id| dialog.binding(id))
                    .map(|binding| {
                        let text = cell_text(binding);
                        let text = pad_str(&text, cell_width, Alignment::Left, Some("…"));
                        if binding.flagged {
                            style(text).red().to_string()
                        } else if binding.is_active() {
                            text.to_string()
                        } else {
                            style(text).dim().to_string()
                        }
                    })
                    .collect();
                term.write_line(&cells.join(" "))?;
            }
        }
        term.write_line("")?;
        Ok(())
    }

    fn edit_value(&self, binding: &ControlBinding) -> Result<String> {
        let current = match &binding.value {
            ControlValue::Text { text, .. } => text.clone(),
            ControlValue::Flag { .. } => String::new(),
        };
        let filter = match &binding.value {
            ControlValue::Text { filter, .. } => *filter,
            ControlValue::Flag { .. } => None,
        };

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{} ({})", binding.label(), binding.option.value_type))
            .with_initial_text(current)
            .allow_empty(true);
        if let Some(filter) = filter {
            input = input.validate_with(move |text: &String| {
                if filter.check(text) == Acceptance::Invalid {
                    Err("That can never become a valid number")
                } else {
                    Ok(())
                }
            });
        }

        input
            .interact()
            .with_context(|| format!("Failed to obtain a value for '{}'", binding.label()))
    }
}

/// Short text shown in the option grid.
fn cell_text(binding: &ControlBinding) -> String {
    match &binding.value {
        ControlValue::Flag { checked } => {
            format!("[{}] {}", if *checked { "x" } else { " " }, binding.label())
        }
        ControlValue::Text { enabled, text, .. } => format!(
            "[{}] {} = {}",
            if *enabled { "x" } else { " " },
            binding.label(),
            text
        ),
    }
}

/// Longer text shown in the selection menu.
fn menu_text(binding: &ControlBinding) -> String {
    let mut text = cell_text(binding);
    if let Some(invocation) = binding.option.invocation() {
        text.push_str(&format!("  ({invocation})"));
    }
    if let Some(help) = &binding.option.help {
        text.push_str(&format!("  {help}"));
    }
    text
}

impl Surface for TerminalSurface {
    fn next_event<S: OptionSource>(&mut self, dialog: &FormDialog<S>) -> Result<FormEvent> {
        if let Some(event) = self.queued.pop_front() {
            return Ok(event);
        }

        loop {
            self.render(dialog)?;

            let mut entries = Vec::new();
            let mut items = Vec::new();
            for id in dialog.groups().iter().flat_map(|g| g.controls()) {
                if let Some(binding) = dialog.binding(id) {
                    entries.push(MenuEntry::Control(id));
                    items.push(menu_text(binding));
                }
            }
            entries.push(MenuEntry::Accept);
            items.push("Accept".to_string());
            entries.push(MenuEntry::Cancel);
            items.push("Cancel".to_string());

            let selection = FuzzySelect::with_theme(&self.theme)
                .with_prompt("Select an option to change (Esc cancels)")
                .items(&items)
                .default(self.cursor.min(items.len() - 1))
                .interact_opt()
                .with_context(|| "Failed to obtain a selection")?;
            let Some(selection) = selection else {
                return Ok(FormEvent::Cancel);
            };
            self.cursor = selection;

            let id = match entries[selection] {
                MenuEntry::Accept => return Ok(FormEvent::Accept),
                MenuEntry::Cancel => return Ok(FormEvent::Cancel),
                MenuEntry::Control(id) => id,
            };
            let binding = dialog
                .binding(id)
                .with_context(|| format!("Menu refers to missing control {id}"))?;

            match &binding.value {
                ControlValue::Flag { checked } => return Ok(FormEvent::Toggle(id, !checked)),
                ControlValue::Text { enabled: false, .. } => {
                    let text = self.edit_value(binding)?;
                    self.queued.push_back(FormEvent::Edit(id, text));
                    return Ok(FormEvent::Toggle(id, true));
                }
                ControlValue::Text { enabled: true, .. } => {
                    let choice = Select::with_theme(&self.theme)
                        .with_prompt(binding.label())
                        .items(&VALUE_ACTIONS)
                        .default(0)
                        .interact_opt()
                        .with_context(|| "Failed to obtain an action")?;
                    match value_action(choice) {
                        Some(ValueAction::Edit) => {
                            return Ok(FormEvent::Edit(id, self.edit_value(binding)?))
                        }
                        Some(ValueAction::Disable) => return Ok(FormEvent::Toggle(id, false)),
                        // Esc: back to the menu, nothing changed
                        None => continue,
                    }
                }
            }
        }
    }
}
