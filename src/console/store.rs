use std::collections::HashMap;

use tracing::debug;

use super::log_merge::merge_logs;
use super::poller::Feed;
use super::version::CardState;
use crate::model::{LogEntry, PluginCatalogEntry, RepositoryRecord, StatsSnapshot};

/// The console's single in-memory view of server state.
///
/// Wholesale feeds are fenced by issue sequence: a response issued before the
/// one already applied is dropped.
#[derive(Debug, Default)]
pub struct ConsoleStore {
    logs: Vec<LogEntry>,
    stats: StatsSnapshot,
    repositories: Vec<RepositoryRecord>,
    catalog: Vec<PluginCatalogEntry>,
    cards: HashMap<String, CardState>,
    release_view: Option<RepositoryRecord>,
    applied: HashMap<Feed, u64>,
}

impl ConsoleStore {
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn stats(&self) -> &StatsSnapshot {
        &self.stats
    }

    pub fn repositories(&self) -> &[RepositoryRecord] {
        &self.repositories
    }

    pub fn repository(&self, id: i64) -> Option<&RepositoryRecord> {
        self.repositories.iter().find(|r| r.id == id)
    }

    pub fn catalog(&self) -> &[PluginCatalogEntry] {
        &self.catalog
    }

    pub fn catalog_entry(&self, plugin_id: &str) -> Option<&PluginCatalogEntry> {
        self.catalog.iter().find(|e| e.id() == plugin_id)
    }

    pub fn card(&self, plugin_id: &str) -> Option<&CardState> {
        self.cards.get(plugin_id)
    }

    /// The repository whose releases are open in the detail view.
    pub fn release_view(&self) -> Option<&RepositoryRecord> {
        self.release_view.as_ref()
    }

    /// Sequence of the last applied response for `feed` (0 when none).
    pub fn applied_seq(&self, feed: Feed) -> u64 {
        self.applied.get(&feed).copied().unwrap_or(0)
    }

    fn accept(&mut self, feed: Feed, seq: u64) -> bool {
        if !feed.is_wholesale() {
            return true;
        }
        let last = self.applied.entry(feed).or_insert(0);
        if seq <= *last {
            debug!(event = "stale_response_dropped", feed = %feed, seq, applied = *last);
            return false;
        }
        *last = seq;
        true
    }

    pub(crate) fn merge_logs(&mut self, batch: &[LogEntry]) {
        self.logs = merge_logs(&self.logs, batch);
    }

    pub(crate) fn replace_stats(&mut self, seq: u64, stats: StatsSnapshot) -> bool {
        if !self.accept(Feed::Stats, seq) {
            return false;
        }
        self.stats = stats;
        true
    }

    pub(crate) fn replace_repositories(&mut self, seq: u64, repositories: Vec<RepositoryRecord>) -> bool {
        if !self.accept(Feed::Repositories, seq) {
            return false;
        }
        self.repositories = repositories;
        self.refresh_release_view();
        true
    }

    /// Swaps in one server-returned record. Older list responses still in
    /// flight are fenced off.
    pub(crate) fn replace_repository(&mut self, seq: u64, record: RepositoryRecord) {
        self.accept(Feed::Repositories, seq);
        match self.repositories.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record,
            None => self.repositories.push(record),
        }
        self.refresh_release_view();
    }

    pub(crate) fn replace_catalog(&mut self, seq: u64, catalog: Vec<PluginCatalogEntry>) -> bool {
        if !self.accept(Feed::Catalog, seq) {
            return false;
        }
        self.cards
            .retain(|id, _| catalog.iter().any(|e| e.id() == id.as_str()));
        self.catalog = catalog;
        true
    }

    /// Sets `visible` on the release in every view that shows it. List
    /// responses issued before `seq` are fenced off.
    pub(crate) fn patch_release_visible(&mut self, seq: u64, release_id: i64, visible: bool) -> usize {
        self.accept(Feed::Repositories, seq);
        let mut hits = 0;
        for repository in self.repositories.iter_mut() {
            hits += repository.set_release_visible(release_id, visible);
        }
        if let Some(open) = self.release_view.as_mut() {
            hits += open.set_release_visible(release_id, visible);
        }
        hits
    }

    pub(crate) fn open_release_view(&mut self, repository_id: i64) -> bool {
        match self.repository(repository_id).cloned() {
            Some(record) => {
                self.release_view = Some(record);
                true
            }
            None => false,
        }
    }

    pub(crate) fn close_release_view(&mut self) {
        self.release_view = None;
    }

    fn refresh_release_view(&mut self) {
        let Some(open_id) = self.release_view.as_ref().map(|r| r.id) else {
            return;
        };
        if let Some(fresh) = self.repositories.iter().find(|r| r.id == open_id) {
            self.release_view = Some(fresh.clone());
        }
    }

    /// Catalog entry and its card, creating the card on first use.
    pub(crate) fn card_slot(
        &mut self,
        plugin_id: &str,
    ) -> Option<(&PluginCatalogEntry, &mut CardState)> {
        let entry = self.catalog.iter().find(|e| e.id() == plugin_id)?;
        let card = self
            .cards
            .entry(plugin_id.to_string())
            .or_insert_with(|| CardState::new(entry.default_version()));
        Some((entry, card))
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
