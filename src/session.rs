//! Per-file reconciliation between in-memory edits and on-disk changes.
//!
//! Each open file gets its own session owning one document, one baseline
//! fingerprint, and the file path: explicit per-tab state rather than
//! module-level globals. Local edits write through immediately and rebaseline
//! from the bytes just written, so the poll that follows never mistakes our
//! own save for an external change. Polls reread the file, classify the
//! difference, and either patch values in place or replace the document
//! wholesale.

use crate::codec;
use crate::diff::{self, DocumentDiff, ValueUpdate};
use crate::document::Document;
use crate::fingerprint::Fingerprint;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
/// Failures a session reports to its caller.
pub enum SyncError {
    /// A local edit could not be persisted.
    ///
    /// The in-memory change is kept (the caller already shows it) and the
    /// baseline is left stale, so the next poll sees the on-disk content as
    /// changed and reconciles from disk. A failed write self-heals rather
    /// than silently diverging.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// File the write targeted.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },
}

#[derive(Clone, PartialEq, Eq, Debug)]
/// What a poll tick observed and did.
pub enum PollResult {
    /// On-disk content matches the baseline, or changed without affecting
    /// the parsed structure or any value.
    NoChange,
    /// The file is gone (or unreadable) at poll time. The in-memory document
    /// is left untouched.
    FileMissing,
    /// Structure is intact; the listed values were patched in place.
    Updated(Vec<ValueUpdate>),
    /// Structure changed; the in-memory document was replaced with this one.
    Rebuilt(Document),
}

/// Reconciler session for one open file.
///
/// The session is a two-state machine per edit operation:
///
/// ```text
/// Clean -> Dirty -> Clean
///          (write + rebaseline, atomic per edit)
/// ```
///
/// There is no observable `Dirty` state between operations: every local edit
/// is a single mutate-write-rebaseline sequence. When the write step fails
/// the session stays dirty in the only way that matters, a stale baseline,
/// and the next [`FileSession::poll_once`] reconciles from disk.
pub struct FileSession {
    path: PathBuf,
    document: Document,
    baseline: Option<Fingerprint>,
}

impl FileSession {
    #[must_use]
    /// Opens a session on a file, parsing its current content.
    ///
    /// A missing or unreadable file yields an empty document with no
    /// baseline; the first successful poll or write establishes one.
    pub fn open(path: PathBuf) -> Self {
        let (document, baseline) = match fs::read(&path) {
            Ok(bytes) => (
                codec::parse(&String::from_utf8_lossy(&bytes)),
                Some(Fingerprint::of_bytes(&bytes)),
            ),
            Err(_) => (Document::new(), None),
        };
        Self {
            path,
            document,
            baseline,
        }
    }

    #[must_use]
    /// The file this session reconciles.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    /// Current in-memory document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Rearranges in-memory sections to match a saved display order.
    ///
    /// Used at open time to restore the order persisted by the state store;
    /// purely presentational, nothing is written to disk.
    pub fn apply_saved_order(&mut self, order: &[String]) {
        self.document.apply_section_order(order);
    }

    /// Applies a local value edit and writes it through to disk.
    ///
    /// The in-memory document is mutated first (a missing section or key is
    /// created), then the whole document is serialized and written, and on
    /// success the baseline fingerprint is taken from the bytes just written.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Write`] if the file could not be written; the
    /// in-memory edit is kept and the baseline left stale (see
    /// [`SyncError`]).
    pub fn apply_local_edit(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<(), SyncError> {
        self.document.set_value(section, key, value);
        self.write_through()
    }

    /// Moves a section one slot towards the front and writes through.
    ///
    /// Returns `Ok(false)` without touching the file when the section is
    /// unknown or already first.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Write`] if the reordered document could not be
    /// written.
    pub fn move_section_up(&mut self, name: &str) -> Result<bool, SyncError> {
        if self.document.move_section_up(name) {
            self.write_through()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Moves a section one slot towards the back and writes through.
    ///
    /// Returns `Ok(false)` without touching the file when the section is
    /// unknown or already last.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Write`] if the reordered document could not be
    /// written.
    pub fn move_section_down(&mut self, name: &str) -> Result<bool, SyncError> {
        if self.document.move_section_down(name) {
            self.write_through()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Rereads the file and reconciles it with the in-memory document.
    ///
    /// The file is read once; its digest decides everything else. An equal
    /// digest short-circuits without reparsing. A changed digest triggers a
    /// reparse and classification: an unchanged structure-and-values result
    /// only refreshes the baseline (whitespace or comment edits), value-only
    /// differences are patched in place, and structural differences replace
    /// the document wholesale.
    pub fn poll_once(&mut self) -> PollResult {
        let Ok(bytes) = fs::read(&self.path) else {
            return PollResult::FileMissing;
        };
        let current = Fingerprint::of_bytes(&bytes);
        if Some(&current) == self.baseline.as_ref() {
            return PollResult::NoChange;
        }

        let incoming = codec::parse(&String::from_utf8_lossy(&bytes));
        match diff::classify(&self.document, &incoming) {
            DocumentDiff::Unchanged => {
                debug!(
                    "{}: content changed but parses identically",
                    self.path.display()
                );
                self.baseline = Some(current);
                PollResult::NoChange
            }
            DocumentDiff::ValueUpdates(updates) => {
                debug!(
                    "{}: {} value update(s) from disk",
                    self.path.display(),
                    updates.len()
                );
                for update in &updates {
                    self.document
                        .set_value(&update.section, &update.key, &update.value);
                }
                self.baseline = Some(current);
                PollResult::Updated(updates)
            }
            DocumentDiff::Structural => {
                debug!("{}: structural change from disk", self.path.display());
                self.document = incoming;
                self.baseline = Some(current);
                PollResult::Rebuilt(self.document.clone())
            }
        }
    }

    /// Serializes the document, writes it, and on success rebaselines from
    /// the written bytes.
    fn write_through(&mut self) -> Result<(), SyncError> {
        let text = codec::serialize(&self.document);
        if let Err(source) = fs::write(&self.path, &text) {
            warn!("{}: write failed: {source}", self.path.display());
            return Err(SyncError::Write {
                path: self.path.clone(),
                source,
            });
        }
        self.baseline = Some(Fingerprint::of_bytes(text.as_bytes()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session.rs"]
mod tests;
