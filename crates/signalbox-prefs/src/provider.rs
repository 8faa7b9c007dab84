// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Capability implemented by modules that contribute preferences.
//!
//! A provider is registered with the registry once. When the registry first
//! creates a record for the provider's class it asks for a description and
//! lets the provider declare its reminders and multiple choices through a
//! [`ChoiceSink`].

use crate::id::ClassId;
use std::collections::BTreeMap;

/// A module that owns a set of reminders and multiple-choice settings.
pub trait PreferenceProvider: Send + Sync {
    /// Class the preferences belong to.
    fn class_id(&self) -> ClassId;

    /// Title shown for the class in the messages pane. `None` leaves any
    /// existing description untouched.
    fn describe(&self) -> Option<String> {
        None
    }

    /// Declare reminders and multiple choices.
    fn register_choices(&self, sink: &mut ChoiceSink) {
        let _ = sink;
    }
}

/// Declaration collected from a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Declaration {
    Reminder {
        item: String,
        description: String,
    },
    Choice {
        item: String,
        description: String,
        options: BTreeMap<i32, String>,
        default: i32,
    },
}

/// Collects reminder and choice declarations from a provider.
#[derive(Debug, Default)]
pub struct ChoiceSink {
    declarations: Vec<Declaration>,
}

impl ChoiceSink {
    /// Declare a reminder prompt.
    pub fn reminder(&mut self, item: impl Into<String>, description: impl Into<String>) -> &mut Self {
        self.declarations.push(Declaration::Reminder {
            item: item.into(),
            description: description.into(),
        });
        self
    }

    /// Declare a multiple choice with its option table and default key.
    pub fn choice<L>(
        &mut self,
        item: impl Into<String>,
        description: impl Into<String>,
        options: impl IntoIterator<Item = (i32, L)>,
        default: i32,
    ) -> &mut Self
    where
        L: Into<String>,
    {
        self.declarations.push(Declaration::Choice {
            item: item.into(),
            description: description.into(),
            options: options.into_iter().map(|(k, l)| (k, l.into())).collect(),
            default,
        });
        self
    }

    pub(crate) fn into_declarations(self) -> Vec<Declaration> {
        self.declarations
    }
}
