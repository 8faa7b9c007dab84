// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fragment storage port and error type for the preference registry.

use crate::xml::{Document, Element};
use thiserror::Error;

/// Storage port for configuration fragments (keyed by element name and namespace).
pub trait FragmentStore {
    /// Load the fragment stored under `name` and `namespace`. Returns `Ok(None)` when missing.
    fn load_fragment(&self, name: &str, namespace: &str) -> Result<Option<Element>, PrefsError>;

    /// Persist `fragments`, replacing stored fragments with the same name and
    /// namespace. One call is one write of the backing document.
    fn save_fragments(&mut self, fragments: &[Element]) -> Result<(), PrefsError>;
}

/// Error type for preference storage operations.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// XML syntax error.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Structurally invalid document.
    #[error("malformed document: {0}")]
    Malformed(String),
    /// Snapshot serialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// In-memory fragment store. Counts writes so callers can observe flush behaviour.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Document,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from an existing document.
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            writes: 0,
        }
    }

    /// Number of `save_fragments` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Backing document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl FragmentStore for MemoryStore {
    fn load_fragment(&self, name: &str, namespace: &str) -> Result<Option<Element>, PrefsError> {
        Ok(self.document.fragment(name, namespace).cloned())
    }

    fn save_fragments(&mut self, fragments: &[Element]) -> Result<(), PrefsError> {
        for fragment in fragments {
            self.document.put_fragment(fragment.clone());
        }
        self.writes += 1;
        Ok(())
    }
}
