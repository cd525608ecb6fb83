//! Ordered parameter document model.
//!
//! A document is an ordered mapping of section names to ordered key/value
//! parameter sets. Order is significant end to end: it drives serialization,
//! on-screen layout, and the persisted per-file section order. Reordering
//! sections is therefore a first-class operation here, not a side effect of
//! other edits.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered key/value pairs within one section.
///
/// Values are always text; the `"1"`/`"0"` toggle convention is a reading the
/// presentation layer applies, never something the data model enforces.
pub type ParameterSet = IndexMap<String, String>;

#[derive(Clone, Debug, Default, Serialize)]
/// In-memory representation of one edited file.
pub struct Document {
    /// Sections keyed by name, in insertion order. Keys that precede any
    /// `[header]` live in the implicit section named `DEFAULT`.
    pub sections: IndexMap<String, ParameterSet>,
}

// IndexMap's own equality ignores insertion order; document equality must
// not, since order is part of the contract.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.sections.len() == other.sections.len()
            && self
                .sections
                .iter()
                .zip(other.sections.iter())
                .all(|((name_a, set_a), (name_b, set_b))| {
                    name_a == name_b && set_a.len() == set_b.len() && set_a.iter().eq(set_b.iter())
                })
    }
}

impl Eq for Document {}

impl Document {
    #[must_use]
    /// Creates an empty document with no sections.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// True when the document holds no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    #[must_use]
    /// Returns the parameter set for a section, if present.
    pub fn section(&self, name: &str) -> Option<&ParameterSet> {
        self.sections.get(name)
    }

    #[must_use]
    /// Returns the value stored under `section`/`key`, if present.
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// Sets the value stored under `section`/`key`.
    ///
    /// A missing section or key is created and appended at the end of its
    /// containing order, so a fresh entry lands where a newly written line
    /// would land in the file.
    pub fn set_value(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Swaps the named section with its predecessor.
    ///
    /// Returns `false` if the section is unknown or already first.
    pub fn move_section_up(&mut self, name: &str) -> bool {
        match self.sections.get_index_of(name) {
            Some(index) if index > 0 => {
                self.sections.swap_indices(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Swaps the named section with its successor.
    ///
    /// Returns `false` if the section is unknown or already last.
    pub fn move_section_down(&mut self, name: &str) -> bool {
        match self.sections.get_index_of(name) {
            Some(index) if index + 1 < self.sections.len() => {
                self.sections.swap_indices(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Rearranges sections to match a previously saved order.
    ///
    /// Saved names that still exist come first, in the saved order; sections
    /// the saved order has never seen keep their relative file order and are
    /// appended after them. Saved names that no longer exist are ignored.
    pub fn apply_section_order(&mut self, order: &[String]) {
        let mut ordered = IndexMap::new();
        for name in order {
            if let Some(params) = self.sections.shift_remove(name) {
                ordered.insert(name.clone(), params);
            }
        }
        for (name, params) in self.sections.drain(..) {
            ordered.insert(name, params);
        }
        self.sections = ordered;
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
