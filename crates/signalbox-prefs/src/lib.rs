// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! User-interface preference registry for Signalbox tools.
//!
//! Remembers reminder prompts, multiple-choice answers, combo/check box last
//! values, simple settings and window geometry, and persists them as
//! namespaced XML fragments through a [`FragmentStore`]. UI toolkits plug in
//! through [`MessagePrompter`]; modules contributing preferences implement
//! [`PreferenceProvider`].

pub mod config;
pub mod fragments;
pub mod id;
pub mod prefs;
pub mod prompt_port;
pub mod provider;
pub mod registry;
pub mod xml;

pub use config::{FragmentStore, MemoryStore, PrefsError};
pub use id::ClassId;
pub use prefs::{ClassPreferences, MultipleChoice, Point, PropertyValue, Reminder, Size, WindowDetails};
pub use prompt_port::{MessageKind, MessagePrompter, MessageRequest, Prompt, PromptResponse};
pub use provider::{ChoiceSink, PreferenceProvider};
pub use registry::{
    PreferenceRegistry, PrefsEvent, RegistryOptions, Snapshot, GENERIC_WINDOW_CLASS,
    REGISTRY_CLASS, REMINDER_ITEM,
};
pub use xml::{Document, Element};
