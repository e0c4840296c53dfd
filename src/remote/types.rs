//! Wire payloads and their conversion into console records.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

use crate::model::{LogEntry, LogLevel, PluginCatalogEntry, PluginRecord};

#[derive(Debug, Serialize)]
pub(super) struct WatchedUpdate {
    pub(super) watched: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct VisibleUpdate {
    pub(super) visible: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ResolveVersionRequest<'a> {
    pub(super) plugin_id: &'a str,
    pub(super) version: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct InstalledExists {
    #[serde(default)]
    pub(super) installed_repo_exists: bool,
}

/// Response of the visibility toggle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityAck {
    pub id: i64,
    #[serde(default)]
    pub visible: Option<bool>,
}

/// A webhook-log row as the server returns it.
#[derive(Clone, Debug, Deserialize)]
pub struct RawLogRecord {
    pub id: i64,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub level: i64,
}

impl RawLogRecord {
    pub fn into_entry(self) -> LogEntry {
        let message = match self.payload.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => match self.action.as_deref().map(str::trim) {
                Some(a) if !a.is_empty() => format!("{}.{}", self.event, a),
                _ => self.event.clone(),
            },
        };
        LogEntry {
            id: self.id.to_string(),
            timestamp: display_time(&self.created_at),
            level: LogLevel::from_code(self.level),
            message,
        }
    }
}

/// `HH:MM:SS` of an RFC 3339 or naive ISO timestamp; anything else passes through.
pub fn display_time(raw: &str) -> String {
    clock_time(raw).unwrap_or_else(|| raw.to_string())
}

fn clock_time(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (h, m, s) = match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(dt) => (dt.hour(), dt.minute(), dt.second()),
        Err(_) => {
            let head: String = raw.replacen(' ', "T", 1).chars().take(19).collect();
            let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
            let dt = PrimitiveDateTime::parse(&head, naive).ok()?;
            (dt.hour(), dt.minute(), dt.second())
        }
    };
    Some(format!("{:02}:{:02}:{:02}", h, m, s))
}

/// Catalog `items`: a list of entries, or an object grouping per-version
/// records by plugin id (newest first). Anything else is an empty page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum CatalogItems {
    List(Vec<serde_json::Value>),
    Grouped(serde_json::Map<String, serde_json::Value>),
    Other(serde::de::IgnoredAny),
}

impl Default for CatalogItems {
    fn default() -> Self {
        CatalogItems::List(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogItemWire {
    #[serde(flatten)]
    record: PluginRecord,
    #[serde(default, rename = "Versions")]
    versions: Option<Vec<String>>,
}

impl CatalogItems {
    pub(super) fn into_entries(self) -> Vec<PluginCatalogEntry> {
        match self {
            CatalogItems::List(values) => values
                .into_iter()
                .filter_map(|v| match serde_json::from_value::<CatalogItemWire>(v) {
                    Ok(w) => Some(PluginCatalogEntry::new(
                        w.record,
                        w.versions.unwrap_or_default(),
                    )),
                    Err(err) => {
                        warn!(event = "catalog_item_skipped", error = %err);
                        None
                    }
                })
                .collect(),
            CatalogItems::Grouped(groups) => groups
                .into_iter()
                .filter_map(|(plugin_id, v)| {
                    let records = match serde_json::from_value::<Vec<PluginRecord>>(v) {
                        Ok(r) => r,
                        Err(err) => {
                            warn!(event = "catalog_group_skipped", plugin_id = %plugin_id, error = %err);
                            return None;
                        }
                    };
                    let versions = records.iter().map(|r| r.version.clone()).collect();
                    let mut default = records.into_iter().next()?;
                    if default.id.is_empty() {
                        default.id = plugin_id;
                    }
                    Some(PluginCatalogEntry::new(default, versions))
                })
                .collect(),
            CatalogItems::Other(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
