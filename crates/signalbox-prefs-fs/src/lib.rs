// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `FragmentStore` for Signalbox tools (one XML document per profile).

use directories::ProjectDirs;
use signalbox_prefs::config::{FragmentStore, PrefsError};
use signalbox_prefs::xml::{Document, Element};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File holding every preference fragment of a profile.
pub const FILE_NAME: &str = "user-interface.xml";

/// Directory under a profile that holds per-node copies.
const NODE_DIR: &str = "profile";

/// Store fragments in a single `user-interface.xml` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsFragmentStore {
    path: PathBuf,
}

impl FsFragmentStore {
    /// Create a store in the user config directory (e.g. `~/.config/Signalbox`).
    pub fn new() -> Result<Self, PrefsError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "Signalbox")
            .ok_or_else(|| PrefsError::Other("could not resolve config dir".into()))?;
        Ok(Self::at(proj.config_dir().join(FILE_NAME)))
    }

    /// Create a store for `profile`, preferring the copy kept for `node` when
    /// one exists.
    pub fn for_profile(profile: impl AsRef<Path>, node: Option<&str>) -> Self {
        let profile = profile.as_ref();
        if let Some(node) = node {
            let per_node = profile.join(NODE_DIR).join(node).join(FILE_NAME);
            if per_node.is_file() {
                debug!(path = %per_node.display(), "using node-specific preferences");
                return Self::at(per_node);
            }
        }
        Self::at(profile.join(FILE_NAME))
    }

    /// Create a store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing document; a missing file reads as an empty document.
    pub fn read_document(&self) -> Result<Document, PrefsError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Document::parse(&text),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(err) => Err(PrefsError::Io(err)),
        }
    }

    fn write_document(&self, document: &Document) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("xml.tmp");
        fs::write(&tmp, document.to_xml()?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl FragmentStore for FsFragmentStore {
    fn load_fragment(&self, name: &str, namespace: &str) -> Result<Option<Element>, PrefsError> {
        debug!(path = %self.path.display(), element = name, "reading preferences fragment");
        Ok(self.read_document()?.fragment(name, namespace).cloned())
    }

    fn save_fragments(&mut self, fragments: &[Element]) -> Result<(), PrefsError> {
        let mut document = self.read_document()?;
        for fragment in fragments {
            document.put_fragment(fragment.clone());
        }
        trace!(path = %self.path.display(), count = fragments.len(), "writing preferences document");
        self.write_document(&document)
    }
}
