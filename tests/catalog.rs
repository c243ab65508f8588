use std::thread;
use std::time::Duration;

use cantor::database::Backend;
use cantor::error::CantorError;
use cantor::persist::SqliteBackend;

fn backend() -> SqliteBackend {
    SqliteBackend::open_in_memory().expect("backend")
}

#[test]
fn persisted_patterns_read_back_verbatim() {
    let mut backend = backend();
    backend.persist("S", "{'a','b'}", &[]).expect("persist ok");
    assert_eq!(backend.pattern("S").expect("pattern ok"), "{'a','b'}");
}

#[test]
fn missing_entries_report_unknown_set() {
    let backend = backend();
    let err = backend.pattern("nope").expect_err("must not exist");
    assert!(matches!(err, CantorError::UnknownSet(_)), "got: {err}");
    let err = backend.info("nope").expect_err("must not exist");
    assert!(matches!(err, CantorError::UnknownSet(_)), "got: {err}");
}

#[test]
fn upsert_preserves_uuid_and_ctime_and_moves_mtime() {
    let mut backend = backend();
    backend.persist("S", "{'a'}", &[]).expect("persist ok");
    let first = backend.info("S").expect("info ok");

    thread::sleep(Duration::from_millis(10));
    backend.persist("S", "{'b'}", &[]).expect("persist ok");
    let second = backend.info("S").expect("info ok");

    assert_eq!(second.uuid, first.uuid, "uuid must be stable across upserts");
    assert_eq!(second.ctime, first.ctime, "ctime must be stable across upserts");
    assert!(second.mtime > first.mtime, "mtime must move on upsert");
    assert_eq!(backend.pattern("S").expect("pattern ok"), "{'b'}");
}

#[test]
fn dependency_lists_round_trip_with_order_and_duplicates() {
    let mut backend = backend();
    let depends_on = ["A".to_string(), "B".to_string(), "A".to_string()];
    backend.persist("S", "A|B|A", &depends_on).expect("persist ok");
    assert_eq!(backend.info("S").expect("info ok").depends_on, depends_on);
}

#[test]
fn listing_returns_all_entries() {
    let mut backend = backend();
    backend.persist("S", "{'a'}", &[]).expect("persist ok");
    backend.persist("T", "S", &["S".to_string()]).expect("persist ok");
    let listed = backend.list().expect("list ok");
    assert_eq!(listed.len(), 2);
    let mut names: Vec<&str> = listed.iter().map(|i| i.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["S", "T"]);
    // every entry carries a distinct uuid
    assert_ne!(listed[0].uuid, listed[1].uuid);
}

#[test]
fn fresh_entries_start_with_equal_ctime_and_mtime() {
    let mut backend = backend();
    backend.persist("S", "{'a'}", &[]).expect("persist ok");
    let info = backend.info("S").expect("info ok");
    assert_eq!(info.ctime, info.mtime);
}
