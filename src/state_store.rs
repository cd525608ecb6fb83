//! Persisted window and per-file UI state.
//!
//! This is a presentation-state cache, not authoritative data: a missing,
//! unreadable, or corrupt snapshot always degrades to defaults, and a failed
//! save is logged and swallowed. Losing it costs the user a window size and
//! some section ordering, never document content.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Per-file presentation state captured at window close.
pub struct UiState {
    #[serde(default)]
    /// Collapsed flag per section name.
    pub collapsed: HashMap<String, bool>,
    #[serde(default)]
    /// Section display order, captured after any user reordering.
    pub order: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Whole-application state snapshot persisted between runs.
pub struct StateSnapshot {
    #[serde(default)]
    /// Window geometry string, if one was captured.
    pub geometry: Option<String>,
    #[serde(default)]
    /// Paths open in tabs, in tab order.
    pub files: Vec<String>,
    #[serde(default)]
    /// Saved per-file UI state keyed by path.
    pub file_states: HashMap<String, UiState>,
    #[serde(default = "default_zoom")]
    /// Zoom factor applied to the parameter grid.
    pub zoom: f64,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            geometry: None,
            files: Vec::new(),
            file_states: HashMap::new(),
            zoom: default_zoom(),
        }
    }
}

fn default_zoom() -> f64 {
    1.0
}

impl StateSnapshot {
    #[must_use]
    /// Loads a snapshot from disk, falling back to defaults on any failure.
    ///
    /// A missing file is the normal first-run case and stays silent; content
    /// that exists but does not decode is logged before being discarded.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("{}: discarding malformed state: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Writes the snapshot to disk as a single JSON document.
    ///
    /// Failures are logged and swallowed: this state is recoverable
    /// convenience, never worth a blocking error.
    pub fn save(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    warn!("{}: failed to save state: {e}", path.display());
                }
            }
            Err(e) => warn!("failed to encode state: {e}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/state_store.rs"]
mod tests;
