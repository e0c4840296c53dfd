use serde::Serialize;

use super::Console;
use crate::model::{AuthorRef, LogEntry, PluginRecord, RepositoryRecord, StatsSnapshot};
use crate::remote::ConsoleApi;

#[derive(Debug, Serialize)]
pub struct DashboardModel<'a> {
    pub identity: Option<&'a AuthorRef>,
    pub setup_pending: bool,
    pub stats: &'a StatsSnapshot,
    pub logs: &'a [LogEntry],
}

/// One line of the repository table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RepositoryRow<'a> {
    pub id: i64,
    pub name: &'a str,
    pub full_name: &'a str,
    pub html_url: &'a str,
    pub author: Option<&'a str>,
    pub releases_total: usize,
    pub releases_open: usize,
    pub watched: bool,
}

impl<'a> RepositoryRow<'a> {
    fn from_record(record: &'a RepositoryRecord) -> Self {
        Self {
            id: record.id,
            name: &record.name,
            full_name: &record.full_name,
            html_url: &record.html_url,
            author: record.author.as_ref().map(|a| a.login.as_str()),
            releases_total: record.releases.len(),
            releases_open: record.open_release_count(),
            watched: record.watched,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PluginCardModel<'a> {
    pub id: &'a str,
    pub default_version: &'a str,
    pub selected_version: &'a str,
    pub versions: &'a [String],
    pub showing_default: bool,
    pub record: &'a PluginRecord,
}

impl<A: ConsoleApi> Console<A> {
    pub fn dashboard(&self) -> DashboardModel<'_> {
        let phase = self.gate.phase();
        DashboardModel {
            identity: phase.identity(),
            setup_pending: phase.is_setup_pending(),
            stats: self.store.stats(),
            logs: self.store.logs(),
        }
    }

    pub fn repository_table(&self) -> Vec<RepositoryRow<'_>> {
        self.store
            .repositories()
            .iter()
            .map(RepositoryRow::from_record)
            .collect()
    }

    /// Cards in catalog order; a card without a selection shows the default.
    pub fn plugin_grid(&self) -> Vec<PluginCardModel<'_>> {
        self.store
            .catalog()
            .iter()
            .map(|entry| match self.store.card(entry.id()) {
                Some(card) => PluginCardModel {
                    id: entry.id(),
                    default_version: entry.default_version(),
                    selected_version: card.selected(),
                    versions: &entry.versions,
                    showing_default: card.is_showing_default(),
                    record: card.displayed(entry),
                },
                None => PluginCardModel {
                    id: entry.id(),
                    default_version: entry.default_version(),
                    selected_version: entry.default_version(),
                    versions: &entry.versions,
                    showing_default: true,
                    record: &entry.record,
                },
            })
            .collect()
    }

    pub fn release_view(&self) -> Option<&RepositoryRecord> {
        self.store.release_view()
    }
}
