// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use signalbox_prefs::{
    ClassId, MemoryStore, MessageKind, MessagePrompter, MessageRequest, PreferenceRegistry, Prompt,
    PromptResponse, REGISTRY_CLASS, REMINDER_ITEM,
};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorder {
    shown: Arc<Mutex<Vec<(MessageKind, String)>>>,
    answer: PromptResponse,
}

impl Recorder {
    fn answering(answer: PromptResponse) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    fn titles(&self) -> Vec<String> {
        self.shown
            .lock()
            .map(|shown| shown.iter().map(|(_, title)| title.clone()).collect())
            .unwrap_or_default()
    }
}

impl MessagePrompter for Recorder {
    fn prompt(&mut self, prompt: &Prompt<'_>) -> PromptResponse {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push((prompt.kind, prompt.title.to_owned()));
        }
        self.answer
    }
}

fn signals() -> ClassId {
    ClassId::new("signalbox.tables.SignalMastTable")
}

#[test]
fn skip_in_future_suppresses_message_and_is_persisted() {
    let recorder = Recorder::answering(PromptResponse {
        skip_session: false,
        skip_future: true,
    });
    let mut registry = PreferenceRegistry::new(MemoryStore::new());
    registry.set_prompter(recorder.clone());

    registry.show_warning_message("Mast in use", "The mast is used by a logix.", &signals(), "inUse");
    assert!(registry.preference_state(&signals(), "inUse"));
    // first the message itself, then the one-off note on where to revert it
    assert_eq!(recorder.titles(), vec!["Mast in use".to_owned(), "Reminder".to_owned()]);
    assert!(registry.preference_state(&ClassId::new(REGISTRY_CLASS), REMINDER_ITEM));

    registry.show_warning_message("Mast in use", "The mast is used by a logix.", &signals(), "inUse");
    assert_eq!(recorder.titles().len(), 2);
    assert!(registry.store().writes() > 0);
}

#[test]
fn session_skip_is_not_persisted() {
    let recorder = Recorder::answering(PromptResponse {
        skip_session: true,
        skip_future: false,
    });
    let mut registry = PreferenceRegistry::new(MemoryStore::new());
    registry.set_prompter(recorder.clone());

    let loader = ClassId::new("signalbox.panel.Loader");
    let request = MessageRequest::new(
        MessageKind::Error,
        "Turnout not found",
        "IT12 could not be found",
        &loader,
        "missingTurnout",
    )
    .session_only(true)
    .always_remember(false);
    registry.show_message(&request);
    registry.show_message(&request);

    assert_eq!(recorder.titles(), vec!["Turnout not found".to_owned()]);
    assert!(registry.session_preference_state("signalbox.panel.Loader.missingTurnout"));
    assert!(!registry.preference_state(&ClassId::new("signalbox.panel.Loader"), "missingTurnout"));
    assert_eq!(registry.store().writes(), 0);
}

#[test]
fn unoffered_options_are_ignored() {
    let recorder = Recorder::answering(PromptResponse {
        skip_session: true,
        skip_future: true,
    });
    let mut registry = PreferenceRegistry::new(MemoryStore::new());
    registry.set_prompter(recorder.clone());

    let class = ClassId::new("signalbox.throttle.Window");
    let request = MessageRequest::new(MessageKind::Info, "Info", "text", &class, "hint")
        .always_remember(false);
    registry.show_message(&request);
    registry.show_message(&request);
    assert_eq!(recorder.titles().len(), 2);
    assert!(!registry.preference_state(&class, "hint"));
    assert!(!registry.session_preference_state("signalbox.throttle.Window.hint"));
}

#[test]
fn preset_reminder_skips_prompt() {
    let recorder = Recorder::default();
    let mut registry = PreferenceRegistry::new(MemoryStore::new());
    registry.set_preference_state(&signals(), "inUse", true);
    registry.set_prompter(recorder.clone());
    registry.show_info_message("Mast in use", "text", &signals(), "inUse");
    registry.show_error_message("Mast in use", "text", &signals(), "inUse");
    assert!(recorder.titles().is_empty());
}

#[test]
fn without_prompter_nothing_is_recorded() {
    let mut registry = PreferenceRegistry::new(MemoryStore::new());
    registry.show_info_message("Title", "text", &signals(), "inUse");
    assert!(!registry.preference_state(&signals(), "inUse"));
}
