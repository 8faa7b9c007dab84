// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommands of `signalbox-prefs`.

use anyhow::{bail, Result};
use comfy_table::Table;
use signalbox_prefs::{ClassId, FragmentStore, PreferenceRegistry};
use std::io::Write;
use tracing::info;

/// A `signalbox-prefs` subcommand.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// List classes that have reminders or multiple choices
    List,
    /// Show the reminders and multiple choices of one class
    Show {
        /// Class id (e.g. `signalbox.tables.TurnoutTable`)
        class: String,
    },
    /// Suppress (or, with --off, re-enable) a reminder message
    SetReminder {
        /// Class id
        class: String,
        /// Reminder item key
        item: String,
        /// Show the message again instead of suppressing it
        #[arg(long)]
        off: bool,
    },
    /// Re-enable every suppressed message, optionally for a single class
    ResetReminders {
        /// Restrict the reset to this class
        class: Option<String>,
    },
    /// Select a multiple-choice option by number or label
    Choice {
        /// Class id
        class: String,
        /// Choice item key
        item: String,
        /// Option number, or a label from the class's option table
        value: String,
    },
    /// Turn a simple setting on (or, with --off, off)
    Setting {
        /// Setting name
        name: String,
        /// Remove the setting
        #[arg(long)]
        off: bool,
    },
    /// List simple settings that are on
    Settings,
    /// List remembered window geometry
    Windows,
    /// Print every stored section as JSON
    Dump,
}

/// Execute `cmd` against `registry`, writing human output to `out`.
pub fn run<S: FragmentStore>(
    registry: &mut PreferenceRegistry<S>,
    cmd: Command,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        Command::List => list(registry, out),
        Command::Show { class } => show(registry, &ClassId::new(class), out),
        Command::SetReminder { class, item, off } => {
            registry.set_preference_state(&ClassId::new(class), &item, !off);
            Ok(())
        }
        Command::ResetReminders { class } => {
            let reset = reset_reminders(registry, class.map(ClassId::new).as_ref());
            writeln!(out, "re-enabled {reset} message(s)")?;
            Ok(())
        }
        Command::Choice { class, item, value } => choose(registry, &ClassId::new(class), &item, &value),
        Command::Setting { name, off } => {
            registry.set_simple_preference_state(&name, !off);
            Ok(())
        }
        Command::Settings => {
            for name in registry.simple_preference_state_list() {
                writeln!(out, "{name}")?;
            }
            Ok(())
        }
        Command::Windows => windows(registry, out),
        Command::Dump => {
            writeln!(out, "{}", registry.snapshot_json()?)?;
            Ok(())
        }
    }
}

fn list<S: FragmentStore>(registry: &PreferenceRegistry<S>, out: &mut impl Write) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Class", "Description", "Suppressed", "Choices"]);
    for class in registry.preferences_classes() {
        let suppressed = registry
            .preference_list(&class)
            .iter()
            .filter(|item| registry.preference_state(&class, item))
            .count();
        table.add_row(vec![
            class.to_string(),
            registry.class_description(&class).to_owned(),
            suppressed.to_string(),
            registry.multiple_choice_size(&class).to_string(),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

fn show<S: FragmentStore>(
    registry: &PreferenceRegistry<S>,
    class: &ClassId,
    out: &mut impl Write,
) -> Result<()> {
    let Some(record) = registry.class_preferences(class) else {
        bail!("no preferences stored for {class}");
    };
    if let Some(description) = &record.description {
        writeln!(out, "{class}: {description}")?;
    } else {
        writeln!(out, "{class}")?;
    }

    let mut reminders = Table::new();
    reminders.set_header(vec!["Reminder", "Description", "Suppressed"]);
    for reminder in &record.reminders {
        reminders.add_row(vec![
            reminder.item.clone(),
            reminder.description.clone(),
            (if reminder.state { "yes" } else { "no" }).to_owned(),
        ]);
    }
    writeln!(out, "{reminders}")?;

    let mut choices = Table::new();
    choices.set_header(vec!["Choice", "Description", "Value", "Default"]);
    for choice in &record.choices {
        let label = |value: i32| match choice.options().get(&value) {
            Some(label) => format!("{value} ({label})"),
            None => value.to_string(),
        };
        choices.add_row(vec![
            choice.item().to_owned(),
            choice.description().to_owned(),
            label(choice.value()),
            label(choice.default_value()),
        ]);
    }
    writeln!(out, "{choices}")?;
    Ok(())
}

/// Switch off every suppressed reminder (of `only`, when given). Returns how
/// many were re-enabled.
fn reset_reminders<S: FragmentStore>(
    registry: &mut PreferenceRegistry<S>,
    only: Option<&ClassId>,
) -> usize {
    let classes = match only {
        Some(class) => vec![class.clone()],
        None => registry.preferences_classes(),
    };
    let mut reset = 0;
    for class in classes {
        for item in registry.preference_list(&class) {
            if registry.preference_state(&class, &item) {
                registry.set_preference_state(&class, &item, false);
                reset += 1;
            }
        }
    }
    info!(reset, "reminders re-enabled");
    reset
}

fn choose<S: FragmentStore>(
    registry: &mut PreferenceRegistry<S>,
    class: &ClassId,
    item: &str,
    value: &str,
) -> Result<()> {
    if let Ok(option) = value.parse::<i32>() {
        registry.set_multiple_choice_option(class, item, option);
        return Ok(());
    }
    let options = registry.choice_options(class, item);
    if !options.values().any(|label| label == value) {
        bail!("{class} {item} has no option labelled {value:?}");
    }
    registry.set_multiple_choice_option_by_label(class, item, value);
    Ok(())
}

fn windows<S: FragmentStore>(registry: &PreferenceRegistry<S>, out: &mut impl Write) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Window", "Location", "Size", "Properties"]);
    for class in registry.window_list() {
        let Some(window) = registry.window_details(&class) else {
            continue;
        };
        let location = if window.save_location() {
            format!("{},{}", window.location().x, window.location().y)
        } else {
            "-".to_owned()
        };
        let size = if window.save_size() && !window.size().is_zero() {
            format!("{}x{}", window.size().width, window.size().height)
        } else {
            "-".to_owned()
        };
        table.add_row(vec![
            class.to_string(),
            location,
            size,
            registry.property_keys(&class).join(", "),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
