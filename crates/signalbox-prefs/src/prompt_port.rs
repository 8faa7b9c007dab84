// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port trait for UI layers that show suppressible messages, so the registry
//! can gate prompts without depending on a specific widget toolkit.

use crate::id::ClassId;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Informational note.
    Info,
    /// Warning that may need attention.
    Warning,
    /// Error requiring user awareness.
    Error,
}

/// What the prompter is asked to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
    /// Severity.
    pub kind: MessageKind,
    /// Dialog title.
    pub title: &'a str,
    /// Body text.
    pub text: &'a str,
    /// Offer "skip for the rest of this session".
    pub offer_session_skip: bool,
    /// Offer "skip in future".
    pub offer_future_skip: bool,
}

/// The user's answer to a prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptResponse {
    /// Suppress this message for the current session.
    pub skip_session: bool,
    /// Suppress this message from now on (persisted as a reminder).
    pub skip_future: bool,
}

/// Shows a message and reports which skip options the user ticked.
pub trait MessagePrompter: Send {
    /// Display `prompt`, blocking until dismissed.
    fn prompt(&mut self, prompt: &Prompt<'_>) -> PromptResponse;
}

/// A request to show a message owned by `class` under `item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRequest<'a> {
    /// Severity.
    pub kind: MessageKind,
    /// Dialog title.
    pub title: &'a str,
    /// Body text.
    pub text: &'a str,
    /// Owning class.
    pub class: &'a ClassId,
    /// Reminder item key.
    pub item: &'a str,
    /// Offer "skip for this session".
    pub session_only: bool,
    /// Offer "skip in future".
    pub always_remember: bool,
}

impl<'a> MessageRequest<'a> {
    /// Request with the given severity that offers "skip in future" only.
    pub fn new(
        kind: MessageKind,
        title: &'a str,
        text: &'a str,
        class: &'a ClassId,
        item: &'a str,
    ) -> Self {
        Self {
            kind,
            title,
            text,
            class,
            item,
            session_only: false,
            always_remember: true,
        }
    }

    /// Toggle the "skip for this session" option.
    pub fn session_only(mut self, offer: bool) -> Self {
        self.session_only = offer;
        self
    }

    /// Toggle the "skip in future" option.
    pub fn always_remember(mut self, offer: bool) -> Self {
        self.always_remember = offer;
        self
    }

    /// Session suppression key (`<class>.<item>`).
    pub fn session_key(&self) -> String {
        format!("{}.{}", self.class, self.item)
    }
}
