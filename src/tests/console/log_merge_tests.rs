use super::*;

use crate::model::LogLevel;

fn entry(id: &str, message: &str) -> LogEntry {
    LogEntry {
        id: id.to_string(),
        timestamp: "00:00:00".to_string(),
        level: LogLevel::Info,
        message: message.to_string(),
    }
}

fn ids(entries: &[LogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

#[test]
fn updated_entry_moves_to_batch_position() {
    let buffer = vec![entry("1", "a"), entry("2", "b"), entry("3", "c")];
    let batch = vec![entry("3", "c updated"), entry("4", "d")];

    let merged = merge_logs(&buffer, &batch);
    assert_eq!(ids(&merged), vec!["1", "2", "3", "4"]);
    assert_eq!(merged[2].message, "c updated");
}

#[test]
fn duplicate_moves_past_newer_buffer_entries() {
    let buffer = vec![entry("1", "a"), entry("2", "b")];
    let batch = vec![entry("1", "a again")];

    let merged = merge_logs(&buffer, &batch);
    assert_eq!(ids(&merged), vec!["2", "1"]);
    assert_eq!(merged[1].message, "a again");
}

#[test]
fn ids_are_unique_and_capacity_holds() {
    let buffer: Vec<LogEntry> = (0..40).map(|i| entry(&i.to_string(), "old")).collect();
    let batch: Vec<LogEntry> = (30..70).map(|i| entry(&i.to_string(), "new")).collect();

    let merged = merge_logs(&buffer, &batch);
    assert_eq!(merged.len(), LOG_CAPACITY);
    let mut seen = std::collections::HashSet::new();
    assert!(merged.iter().all(|e| seen.insert(e.id.clone())));
    assert_eq!(merged.last().unwrap().id, "69");
    assert_eq!(merged.first().unwrap().id, "20");
}

#[test]
fn sixty_single_batches_keep_the_last_fifty() {
    let mut buffer = Vec::new();
    for i in 1..=60 {
        buffer = merge_logs(&buffer, &[entry(&i.to_string(), "x")]);
    }
    let expected: Vec<String> = (11..=60).map(|i| i.to_string()).collect();
    let got: Vec<String> = buffer.iter().map(|e| e.id.clone()).collect();
    assert_eq!(got, expected);
}

#[test]
fn empty_batch_is_identity() {
    let buffer = vec![entry("1", "a"), entry("2", "b")];
    let merged = merge_logs(&buffer, &[]);
    assert_eq!(merged, merge_logs(&merged, &[]));
    assert_eq!(merged, buffer);
}

#[test]
fn same_batch_twice_changes_nothing() {
    let buffer = vec![entry("1", "a"), entry("2", "b")];
    let batch = vec![entry("2", "b2"), entry("3", "c")];

    let once = merge_logs(&buffer, &batch);
    let twice = merge_logs(&once, &batch);
    assert_eq!(once, twice);
}

#[test]
fn last_instance_inside_one_batch_wins() {
    let batch = vec![entry("5", "first"), entry("6", "x"), entry("5", "second")];
    let merged = merge_logs(&[], &batch);
    assert_eq!(ids(&merged), vec!["6", "5"]);
    assert_eq!(merged[1].message, "second");
}

#[test]
fn numeric_level_codes_map_to_levels() {
    assert_eq!(LogLevel::from_code(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_code(2), LogLevel::Error);
    assert_eq!(LogLevel::from_code(3), LogLevel::Success);
    assert_eq!(LogLevel::from_code(0), LogLevel::Info);
    assert_eq!(LogLevel::from_code(42), LogLevel::Info);
    assert_eq!(LogLevel::from_code(-1), LogLevel::Info);
}
