//! Classifies the difference between two parsed documents.
//!
//! The distinction matters because of what the caller must do with it: a
//! value-only change patches existing widgets in place, which is cheap and
//! preserves focus and scroll position, while any change to the set or order
//! of sections or keys forces a full rebuild of the rendered tree. The
//! classifier keeps that boundary exact so rebuilds happen only when the
//! structure genuinely moved.

use crate::document::Document;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// A single value change, addressed by section and key.
pub struct ValueUpdate {
    /// Section containing the changed key.
    pub section: String,
    /// Key whose value changed.
    pub key: String,
    /// The new value text.
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
/// Outcome of comparing an in-memory document against a fresh parse.
pub enum DocumentDiff {
    /// Same sections, same keys, same order, same values.
    Unchanged,
    /// Identical structure; only the listed values differ.
    ValueUpdates(Vec<ValueUpdate>),
    /// A section or key was added, removed, or moved. Covers pure reorders
    /// too, even when no value text changed.
    Structural,
}

#[must_use]
/// Compares `old` and `new` and classifies the difference.
///
/// Section lists are compared by name and order, then each section's key list
/// by name and order; any mismatch is [`DocumentDiff::Structural`]. With
/// structure intact, differing values are collected in the new document's
/// section and key order.
pub fn classify(old: &Document, new: &Document) -> DocumentDiff {
    if !new.section_names().eq(old.section_names()) {
        return DocumentDiff::Structural;
    }
    for ((_, old_params), (_, new_params)) in old.sections.iter().zip(&new.sections) {
        if !new_params.keys().eq(old_params.keys()) {
            return DocumentDiff::Structural;
        }
    }

    // Names and key lists matched pairwise, so the zips below stay aligned.
    let mut updates = Vec::new();
    for ((_, old_params), (section, new_params)) in old.sections.iter().zip(&new.sections) {
        for ((_, old_value), (key, value)) in old_params.iter().zip(new_params) {
            if old_value != value {
                updates.push(ValueUpdate {
                    section: section.clone(),
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }
    }

    if updates.is_empty() {
        DocumentDiff::Unchanged
    } else {
        DocumentDiff::ValueUpdates(updates)
    }
}

#[cfg(test)]
#[path = "tests/diff.rs"]
mod tests;
