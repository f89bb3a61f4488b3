use super::*;

use chrono::{TimeZone, Utc};
use shared::domain::{Answer, NO_MESSAGE, YES_MESSAGE};

fn fixed_response(answer: Answer) -> Response {
    let at = Utc.with_ymd_and_hms(2026, 10, 16, 13, 45, 10).unwrap();
    Response::new(answer, at)
}

#[test]
fn load_returns_none_for_empty_slot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path());
    assert!(store.load().is_none());
    assert!(store.raw_payload().is_none());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path());
    let response = fixed_response(Answer::Yes);

    store.save(&response).expect("save");
    let loaded = store.load().expect("record present");

    assert_eq!(loaded.answer(), response.answer());
    assert_eq!(loaded.timestamp(), response.timestamp());
    assert_eq!(loaded.message(), YES_MESSAGE);
    assert_eq!(loaded, response);
}

#[test]
fn save_overwrites_previous_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path());

    store.save(&fixed_response(Answer::Yes)).expect("first save");
    let latest = Response::now(Answer::No);
    store.save(&latest).expect("second save");

    assert_eq!(store.load(), Some(latest));
    let files: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .collect();
    assert_eq!(files.len(), 1, "slot must not accumulate records or temp files");
}

#[test]
fn clear_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path());
    store.save(&fixed_response(Answer::No)).expect("save");

    store.clear().expect("first clear");
    assert!(store.load().is_none());
    store.clear().expect("second clear");
    assert!(store.load().is_none());
    assert!(!store.path().exists());
}

#[test]
fn clear_on_never_written_slot_is_a_noop() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path().join("not-created-yet"));
    store.clear().expect("clear");
}

#[test]
fn malformed_payloads_load_as_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path());

    for payload in [
        "not json at all",
        "{}",
        r#"{"timestamp":"2026-10-16T13:45:10.000Z","message":"hola"}"#,
        r#"{"answer":"maybe","timestamp":"2026-10-16T13:45:10.000Z","message":"hola"}"#,
        r#"{"answer":"yes","timestamp":"ayer","message":"hola"}"#,
    ] {
        std::fs::write(store.path(), payload).expect("seed slot");
        assert!(store.load().is_none(), "payload should be rejected: {payload}");
        assert_eq!(store.raw_payload().as_deref(), Some(payload));
    }
}

#[test]
fn tolerates_extra_fields_from_older_clients() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path());
    std::fs::write(
        store.path(),
        format!(
            r#"{{"id":7,"answer":"no","timestamp":"2026-10-16T13:45:10.000Z","message":"{NO_MESSAGE}","user_agent":"Mozilla/5.0"}}"#
        ),
    )
    .expect("seed slot");

    let loaded = store.load().expect("record present");
    assert_eq!(loaded.answer(), Answer::No);
    assert_eq!(loaded.message(), NO_MESSAGE);
}

#[test]
fn edited_message_in_slot_is_replaced_by_fixed_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path());
    std::fs::write(
        store.path(),
        r#"{"answer":"yes","timestamp":"2026-10-16T13:45:10.000Z","message":"texto inventado"}"#,
    )
    .expect("seed slot");

    let loaded = store.load().expect("record present");
    assert_eq!(loaded.answer(), Answer::Yes);
    assert_eq!(loaded.message(), YES_MESSAGE);
    assert_eq!(loaded, fixed_response(Answer::Yes));
}

#[test]
fn raw_payload_matches_persisted_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ResponseStore::open(dir.path());
    store.save(&fixed_response(Answer::Yes)).expect("save");

    let raw = store.raw_payload().expect("payload");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["answer"], "yes");
    assert_eq!(value["timestamp"], "2026-10-16T13:45:10.000Z");
    assert_eq!(value["message"], YES_MESSAGE);
}

#[test]
fn save_creates_missing_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("profiles").join("default");
    let store = ResponseStore::open(&nested);

    store.save(&fixed_response(Answer::Yes)).expect("save");
    assert!(nested.join("lunch-invitation-response.json").exists());
}
