use std::collections::HashMap;

use crate::model::LogEntry;

/// The event-log buffer keeps at most this many entries.
pub const LOG_CAPACITY: usize = 50;

/// Merges a freshly fetched batch into the buffer.
///
/// Each id survives once, taking its last-seen instance and position in
/// `buffer ++ batch`. The oldest entries are dropped past [`LOG_CAPACITY`].
pub fn merge_logs(buffer: &[LogEntry], batch: &[LogEntry]) -> Vec<LogEntry> {
    let combined: Vec<&LogEntry> = buffer.iter().chain(batch.iter()).collect();

    let mut last_seen: HashMap<&str, usize> = HashMap::with_capacity(combined.len());
    for (pos, entry) in combined.iter().enumerate() {
        last_seen.insert(entry.id.as_str(), pos);
    }

    let mut merged: Vec<LogEntry> = combined
        .iter()
        .enumerate()
        .filter(|(pos, entry)| last_seen.get(entry.id.as_str()) == Some(pos))
        .map(|(_, entry)| (*entry).clone())
        .collect();

    if merged.len() > LOG_CAPACITY {
        let excess = merged.len() - LOG_CAPACITY;
        merged.drain(..excess);
    }
    merged
}

#[cfg(test)]
#[path = "../tests/console/log_merge_tests.rs"]
mod tests;
