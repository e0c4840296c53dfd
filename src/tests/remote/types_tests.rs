use super::*;

use crate::model::StatsSnapshot;

fn raw(v: serde_json::Value) -> RawLogRecord {
    serde_json::from_value(v).unwrap()
}

#[test]
fn raw_log_prefers_payload_then_event_action() {
    let e = raw(serde_json::json!({
        "id": 7, "event": "release", "action": "published",
        "payload": "v1.2.0 published", "created_at": "2024-05-01T12:34:56.123456", "level": 3
    }))
    .into_entry();
    assert_eq!(e.id, "7");
    assert_eq!(e.message, "v1.2.0 published");
    assert_eq!(e.timestamp, "12:34:56");
    assert_eq!(e.level, LogLevel::Success);

    let e = raw(serde_json::json!({
        "id": 8, "event": "push", "action": "created", "payload": "", "created_at": "x", "level": 0
    }))
    .into_entry();
    assert_eq!(e.message, "push.created");
    assert_eq!(e.timestamp, "x");
    assert_eq!(e.level, LogLevel::Info);

    let e = raw(serde_json::json!({ "id": 9, "event": "ping", "action": null, "payload": null, "level": 2 }))
        .into_entry();
    assert_eq!(e.message, "ping");
    assert_eq!(e.level, LogLevel::Error);
}

#[test]
fn display_time_handles_rfc3339_and_naive_forms() {
    assert_eq!(display_time("2024-05-01T08:09:10Z"), "08:09:10");
    assert_eq!(display_time("2024-05-01T08:09:10+02:00"), "08:09:10");
    assert_eq!(display_time("2024-05-01 23:59:01"), "23:59:01");
    assert_eq!(display_time("yesterday"), "yesterday");
}

#[test]
fn catalog_list_form_keeps_versions_and_skips_malformed_items() {
    let items: CatalogItems = serde_json::from_value(serde_json::json!([
        {
            "Id": "hello", "Name": "Hello", "Version": "1.2.0",
            "Versions": ["1.2.0", "1.1.0", "1.1.0"], "Tags": null, "Download": "https://dl/h"
        },
        "not an object",
        { "Id": "bye", "Name": "Bye", "Version": "0.3.0" }
    ]))
    .unwrap();
    let entries = items.into_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id(), "hello");
    assert_eq!(entries[0].versions, vec!["1.2.0", "1.1.0"]);
    assert_eq!(entries[0].record.download_link(), Some("https://dl/h"));
    assert!(entries[0].record.tags.is_empty());
    assert_eq!(entries[1].versions, vec!["0.3.0"]);
}

#[test]
fn catalog_grouped_form_uses_first_record_as_default() {
    let items: CatalogItems = serde_json::from_value(serde_json::json!({
        "hello": [
            { "Name": "Hello", "Version": "2.0.0" },
            { "Id": "hello", "Name": "Hello", "Version": "1.0.0" }
        ]
    }))
    .unwrap();
    let entries = items.into_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id(), "hello");
    assert_eq!(entries[0].default_version(), "2.0.0");
    assert_eq!(entries[0].versions, vec!["2.0.0", "1.0.0"]);
}

#[test]
fn catalog_empty_object_or_garbage_is_empty() {
    let empty: CatalogItems = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(empty.into_entries().is_empty());
    let other: CatalogItems = serde_json::from_value(serde_json::json!(42)).unwrap();
    assert!(other.into_entries().is_empty());
    assert!(CatalogItems::default().into_entries().is_empty());
}

#[test]
fn stats_missing_fields_read_as_zero() {
    let s: StatsSnapshot = serde_json::from_value(serde_json::json!({ "total_plugins": 4 })).unwrap();
    assert_eq!(
        s,
        StatsSnapshot {
            total_plugins: 4,
            installed_repos: 0,
            watched_repos: 0
        }
    );
}

#[test]
fn visibility_ack_tolerates_missing_flag() {
    let ack: VisibilityAck = serde_json::from_value(serde_json::json!({ "id": 3 })).unwrap();
    assert_eq!(ack.visible, None);
}
