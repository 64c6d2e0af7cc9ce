//! The `{ "leads": [...] }` document envelope and file I/O.
//!
//! The reconciler itself never touches the filesystem; these are the thin
//! collaborators that decode a batch from disk and write the survivor set
//! and resolution log back out as pretty-printed JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DedupeResult;
use crate::event::ResolutionEvent;
use crate::record::Record;

/// A batch of lead records under the `leads` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadsDocument {
    /// The records, in document order.
    pub leads: Vec<Record>,
}

impl LeadsDocument {
    /// Wraps a record collection in the envelope.
    #[must_use]
    pub fn new(leads: Vec<Record>) -> Self {
        Self { leads }
    }

    /// Reads and decodes a leads document.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files or documents missing the `leads` key.
    pub fn load(path: impl AsRef<Path>) -> DedupeResult<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Writes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Fails when serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> DedupeResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Writes a resolution log as a pretty-printed JSON array.
///
/// # Errors
///
/// Fails when serialization or the write fails.
pub fn save_log(path: impl AsRef<Path>, log: &[ResolutionEvent]) -> DedupeResult<()> {
    fs::write(path, serde_json::to_string_pretty(log)?)?;
    Ok(())
}
