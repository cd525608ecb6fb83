use super::{classify, DocumentDiff, ValueUpdate};
use crate::codec::parse;

#[test]
fn test_identical_documents_are_unchanged() {
    let old = parse("a=1\n");
    let new = parse("a=1\n");
    assert_eq!(classify(&old, &new), DocumentDiff::Unchanged);
}

#[test]
fn test_value_change_is_minimal_update() {
    let old = parse("a=1\n");
    let new = parse("a=0\n");
    assert_eq!(
        classify(&old, &new),
        DocumentDiff::ValueUpdates(vec![ValueUpdate {
            section: "DEFAULT".to_string(),
            key: "a".to_string(),
            value: "0".to_string(),
        }])
    );
}

#[test]
fn test_added_section_is_structural() {
    let old = parse("a=1\n");
    let new = parse("a=1\n[Sec]\nb=2\n");
    assert_eq!(classify(&old, &new), DocumentDiff::Structural);
}

#[test]
fn test_removed_section_is_structural() {
    let old = parse("a=1\n[Sec]\nb=2\n");
    let new = parse("a=1\n");
    assert_eq!(classify(&old, &new), DocumentDiff::Structural);
}

#[test]
fn test_renamed_key_is_structural() {
    let old = parse("a=1\n");
    let new = parse("b=1\n");
    assert_eq!(classify(&old, &new), DocumentDiff::Structural);
}

#[test]
fn test_reordered_sections_are_structural() {
    // Order is significant even when no value text changed.
    let old = parse("[A]\nx=1\n[B]\ny=2\n");
    let new = parse("[B]\ny=2\n[A]\nx=1\n");
    assert_eq!(classify(&old, &new), DocumentDiff::Structural);
}

#[test]
fn test_reordered_keys_are_structural() {
    let old = parse("[A]\nx=1\ny=2\n");
    let new = parse("[A]\ny=2\nx=1\n");
    assert_eq!(classify(&old, &new), DocumentDiff::Structural);
}

#[test]
fn test_updates_come_in_new_document_order() {
    let old = parse("[One]\na=1\nb=2\n[Two]\nc=3\n");
    let new = parse("[One]\na=9\nb=2\n[Two]\nc=8\n");

    let DocumentDiff::ValueUpdates(updates) = classify(&old, &new) else {
        panic!("expected value updates");
    };
    let listed: Vec<(&str, &str, &str)> = updates
        .iter()
        .map(|u| (u.section.as_str(), u.key.as_str(), u.value.as_str()))
        .collect();
    assert_eq!(listed, vec![("One", "a", "9"), ("Two", "c", "8")]);
}

#[test]
fn test_both_empty_is_unchanged() {
    let old = parse("");
    let new = parse("");
    assert_eq!(classify(&old, &new), DocumentDiff::Unchanged);
}
