//! Forgiving INI codec preserving section and key order.
//!
//! Parsing is lossy by design: blank lines and comments are dropped, and any
//! line that is neither a `[section]` header nor a `key=value` pair is
//! silently ignored. The file may be mid-write by another process when we
//! read it, so a torn line must degrade to nothing rather than fail the whole
//! parse; the next poll picks up the settled content.

use crate::document::{Document, ParameterSet};

/// Name of the implicit section holding keys that precede any `[header]`.
pub const DEFAULT_SECTION: &str = "DEFAULT";

#[must_use]
/// Parses INI-style text into an ordered [`Document`].
///
/// Section headers are trimmed `[name]` lines. A repeated header keeps the
/// section's original position but starts its contents over. `key=value`
/// lines split on the first `=` with both sides trimmed; keys seen before any
/// header land in the implicit `DEFAULT` section, which is only materialized
/// when such a key exists.
pub fn parse(text: &str) -> Document {
    let mut doc = Document::new();
    let mut current: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = header_name(line) {
            if name == DEFAULT_SECTION {
                // The implicit section always sits at the front so its
                // header can be omitted on save.
                doc.sections
                    .shift_insert(0, name.clone(), ParameterSet::new());
            } else {
                doc.sections.insert(name.clone(), ParameterSet::new());
            }
            current = Some(name);
        } else if let Some((key, value)) = line.split_once('=') {
            let section = current
                .clone()
                .unwrap_or_else(|| DEFAULT_SECTION.to_string());
            doc.sections
                .entry(section)
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    doc
}

#[must_use]
/// Serializes a [`Document`] back to INI-style text.
///
/// Sections emit in iteration order, keys in iteration order, one blank line
/// after each section's key block. The `DEFAULT` section's header is omitted;
/// an empty `DEFAULT` emits nothing at all.
pub fn serialize(document: &Document) -> String {
    let mut out = String::new();
    for (section, params) in &document.sections {
        if section == DEFAULT_SECTION {
            if params.is_empty() {
                continue;
            }
        } else {
            out.push('[');
            out.push_str(section);
            out.push_str("]\n");
        }
        for (key, value) in params {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Extracts the section name from a trimmed `[name]` line, or `None`.
fn header_name(line: &str) -> Option<String> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    Some(inner.trim().to_string())
}

#[cfg(test)]
#[path = "tests/codec.rs"]
mod tests;
