use super::{FileSession, PollResult, SyncError};
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn session_for(content: &str) -> (NamedTempFile, FileSession) {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file.flush().unwrap();
    let session = FileSession::open(file.path().to_path_buf());
    (file, session)
}

#[test]
fn test_local_edit_writes_through() {
    let (file, mut session) = session_for("a=1\n\n[Sec]\nb=2\n\n");

    session.apply_local_edit("Sec", "b", "5").unwrap();

    assert_eq!(session.document().value("Sec", "b"), Some("5"));
    let on_disk = fs::read_to_string(file.path()).unwrap();
    assert_eq!(on_disk, "a=1\n\n[Sec]\nb=5\n\n");
}

#[test]
fn test_self_write_is_not_an_external_change() {
    let (_file, mut session) = session_for("a=1\n\n");

    session.apply_local_edit("DEFAULT", "a", "0").unwrap();
    assert_eq!(
        session.poll_once(),
        PollResult::NoChange,
        "our own write must not look like an external change"
    );
}

#[test]
fn test_reorder_write_through_is_also_immune() {
    let (file, mut session) = session_for("[A]\nx=1\n\n[B]\ny=2\n\n");

    assert!(session.move_section_down("A").unwrap());
    let on_disk = fs::read_to_string(file.path()).unwrap();
    assert_eq!(on_disk, "[B]\ny=2\n\n[A]\nx=1\n\n");
    assert_eq!(session.poll_once(), PollResult::NoChange);
}

#[test]
fn test_external_value_edit_patches_in_place() {
    let (file, mut session) = session_for("[Sec]\na=1\nb=2\n\n");

    fs::write(file.path(), "[Sec]\na=1\nb=9\n\n").unwrap();

    let PollResult::Updated(updates) = session.poll_once() else {
        panic!("expected a value update");
    };
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].section, "Sec");
    assert_eq!(updates[0].key, "b");
    assert_eq!(updates[0].value, "9");
    assert_eq!(session.document().value("Sec", "b"), Some("9"));

    assert_eq!(
        session.poll_once(),
        PollResult::NoChange,
        "baseline should advance after reconciling"
    );
}

#[test]
fn test_external_structural_edit_rebuilds() {
    let (file, mut session) = session_for("[Sec]\na=1\n\n");

    fs::write(file.path(), "[Sec]\na=1\n\n[New]\nb=2\n\n").unwrap();

    let PollResult::Rebuilt(document) = session.poll_once() else {
        panic!("expected a rebuild");
    };
    let names: Vec<&str> = document.section_names().collect();
    assert_eq!(names, vec!["Sec", "New"]);
    assert_eq!(session.document().value("New", "b"), Some("2"));
}

#[test]
fn test_whitespace_only_edit_is_no_change() {
    let (file, mut session) = session_for("[Sec]\na=1\n\n");

    // Different bytes, same parsed structure and values.
    fs::write(file.path(), "# appeared\n[Sec]\na = 1\n").unwrap();

    assert_eq!(session.poll_once(), PollResult::NoChange);
    assert_eq!(session.document().value("Sec", "a"), Some("1"));
    assert_eq!(
        session.poll_once(),
        PollResult::NoChange,
        "the new bytes should become the baseline"
    );
}

#[test]
fn test_missing_file_reported_without_mutation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("params.ini");
    fs::write(&path, "[Sec]\na=1\n\n").unwrap();

    let mut session = FileSession::open(path.clone());
    fs::remove_file(&path).unwrap();

    assert_eq!(session.poll_once(), PollResult::FileMissing);
    assert_eq!(
        session.document().value("Sec", "a"),
        Some("1"),
        "the in-memory document must be left alone"
    );
}

#[test]
fn test_file_reappearing_reconciles() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("params.ini");
    fs::write(&path, "[Sec]\na=1\n\n").unwrap();

    let mut session = FileSession::open(path.clone());
    fs::remove_file(&path).unwrap();
    assert_eq!(session.poll_once(), PollResult::FileMissing);

    fs::write(&path, "[Sec]\na=2\n\n").unwrap();
    let PollResult::Updated(updates) = session.poll_once() else {
        panic!("expected reconciliation once the file is back");
    };
    assert_eq!(updates[0].value, "2");
}

#[test]
fn test_failed_write_keeps_edit_and_heals_on_poll() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("params.ini");
    fs::write(&path, "a=1\n\n").unwrap();
    let mut session = FileSession::open(path.clone());

    // Make the write fail by putting a directory where the file was.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    let err = session
        .apply_local_edit("DEFAULT", "a", "0")
        .expect_err("writing over a directory must fail");
    assert!(matches!(err, SyncError::Write { .. }));
    assert_eq!(
        session.document().value("DEFAULT", "a"),
        Some("0"),
        "the optimistic in-memory edit is kept"
    );

    // An external writer restores the file with the authoritative content.
    fs::remove_dir(&path).unwrap();
    fs::write(&path, "a=2\n\n").unwrap();

    let PollResult::Updated(updates) = session.poll_once() else {
        panic!("stale baseline should force reconciliation from disk");
    };
    assert_eq!(updates[0].value, "2");
    assert_eq!(session.document().value("DEFAULT", "a"), Some("2"));
}

#[test]
fn test_open_missing_file_starts_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("new.ini");

    let mut session = FileSession::open(path.clone());
    assert!(session.document().is_empty());

    // The first edit creates the file.
    session.apply_local_edit("Sec", "fresh", "1").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[Sec]\nfresh=1\n\n");
    assert_eq!(session.poll_once(), PollResult::NoChange);
}

#[test]
fn test_saved_order_is_presentation_only() {
    let (file, mut session) = session_for("[A]\nx=1\n\n[B]\ny=2\n\n");

    session.apply_saved_order(&["B".to_string(), "A".to_string()]);
    let names: Vec<&str> = session.document().section_names().collect();
    assert_eq!(names, vec!["B", "A"]);

    // Nothing was written, so disk still has the original order; the next
    // poll sees no byte change either.
    let on_disk = fs::read_to_string(file.path()).unwrap();
    assert!(on_disk.find("[A]").unwrap() < on_disk.find("[B]").unwrap());
    assert_eq!(session.poll_once(), PollResult::NoChange);
}
