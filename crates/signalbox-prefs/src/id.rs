// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed identifier for preference-owning classes.

use serde::Serialize;
use std::fmt;

/// Dotted name of a class that owns reminders, choices or window details
/// (e.g. `signalbox.tables.TurnoutTable`).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    /// Wrap a class name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the class name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for ClassId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
