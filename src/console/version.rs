use tracing::{debug, warn};

use crate::model::{PluginCatalogEntry, PluginRecord};
use crate::remote::ConsoleApi;

/// Per-card version selection.
///
/// `selected` always mirrors the last choice, even when resolving it failed.
/// `resolved` holds the record shown in place of the catalog default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardState {
    selected: String,
    resolved: Option<PluginRecord>,
}

impl CardState {
    pub fn new(default_version: &str) -> Self {
        Self {
            selected: default_version.to_string(),
            resolved: None,
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn resolved(&self) -> Option<&PluginRecord> {
        self.resolved.as_ref()
    }

    /// The record a card shows for `entry`.
    pub fn displayed<'a>(&'a self, entry: &'a PluginCatalogEntry) -> &'a PluginRecord {
        self.resolved.as_ref().unwrap_or(&entry.record)
    }

    pub fn is_showing_default(&self) -> bool {
        self.resolved.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionOutcome {
    /// The default was picked; no server call was made.
    Default,
    Resolved,
    /// The server call failed; the card keeps what it showed before.
    Failed,
    UnknownPlugin,
}

/// Applies a version choice to one card. Non-default choices hit the server
/// every time.
pub async fn select_version<A: ConsoleApi>(
    api: &A,
    entry: &PluginCatalogEntry,
    card: &mut CardState,
    version: &str,
) -> VersionOutcome {
    card.selected = version.to_string();

    if version == entry.default_version() {
        card.resolved = None;
        debug!(event = "version_default", plugin_id = %entry.id(), version);
        return VersionOutcome::Default;
    }

    match api.resolve_version(entry.id(), version).await {
        Ok(record) => {
            debug!(event = "version_resolved", plugin_id = %entry.id(), version);
            card.resolved = Some(record);
            VersionOutcome::Resolved
        }
        Err(err) => {
            warn!(event = "version_resolve_failed", plugin_id = %entry.id(), version, error = %err);
            VersionOutcome::Failed
        }
    }
}
