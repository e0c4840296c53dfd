//! Client-side console core: session gating, polling, merging and the
//! mutation reconciler, all feeding one [`ConsoleStore`].

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

use crate::model::ConsoleConfig;
use crate::remote::{ApiError, ConsoleApi};

mod log_merge;
mod notices;
mod poller;
mod reconcile;
mod session;
mod store;
mod version;
mod views;

pub use self::log_merge::{LOG_CAPACITY, merge_logs};
pub use self::notices::{Notice, NoticeKind, NoticeLog};
pub use self::poller::{Feed, FeedPayload, FeedUpdate, Poller, RequestClock};
pub use self::session::{SessionGate, SessionPhase, SetupState, View};
pub use self::store::ConsoleStore;
pub use self::version::{CardState, VersionOutcome, select_version};
pub use self::views::{DashboardModel, PluginCardModel, RepositoryRow};

/// Owns the store and is its only writer. Pollers hand their results over a
/// channel; [`Console::pump`] and [`Console::drain`] apply them.
pub struct Console<A: ConsoleApi> {
    api: Arc<A>,
    clock: RequestClock,
    gate: SessionGate<A>,
    store: ConsoleStore,
    notices: NoticeLog,
    updates: UnboundedReceiver<FeedUpdate>,
}

impl<A: ConsoleApi> Console<A> {
    pub fn new(api: Arc<A>, config: &ConsoleConfig) -> Self {
        let clock = RequestClock::default();
        let (tx, updates) = mpsc::unbounded_channel();
        let gate = SessionGate::new(Arc::clone(&api), clock.clone(), tx, &config.intervals);
        Self {
            api,
            clock,
            gate,
            store: ConsoleStore::default(),
            notices: NoticeLog::default(),
            updates,
        }
    }

    /// Settles the session (identity probe, then setup check) and starts the
    /// pollers the current view calls for.
    pub async fn start(&mut self) -> &SessionPhase {
        self.gate.establish().await
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &SessionPhase {
        self.gate.phase()
    }

    pub fn view(&self) -> Option<View> {
        self.gate.view()
    }

    pub fn set_view(&mut self, view: Option<View>) {
        self.gate.set_view(view);
    }

    pub fn is_polling(&self, feed: Feed) -> bool {
        self.gate.is_polling(feed)
    }

    pub fn poller(&self, feed: Feed) -> &Poller {
        self.gate.poller(feed)
    }

    /// Issue-order clock shared with the pollers.
    pub fn clock(&self) -> &RequestClock {
        &self.clock
    }

    pub fn store(&self) -> &ConsoleStore {
        &self.store
    }

    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    /// Waits for the next poll result and applies it.
    pub async fn pump(&mut self) -> Option<Feed> {
        let update = self.updates.recv().await?;
        let feed = update.payload.feed();
        self.apply(update);
        Some(feed)
    }

    /// Applies every poll result already queued. Returns how many were taken.
    pub fn drain(&mut self) -> usize {
        let mut taken = 0;
        while let Ok(update) = self.updates.try_recv() {
            self.apply(update);
            taken += 1;
        }
        taken
    }

    /// Applies one poll result. Returns false when it was dropped as stale
    /// or changed nothing.
    pub fn apply(&mut self, update: FeedUpdate) -> bool {
        if !self.gate.phase().is_authenticated() {
            debug!(event = "update_dropped_signed_out", feed = %update.payload.feed(), seq = update.seq);
            return false;
        }
        let seq = update.seq;
        let feed = update.payload.feed();
        let applied = match update.payload {
            FeedPayload::Logs(batch) => {
                self.store.merge_logs(&batch);
                true
            }
            FeedPayload::Stats(stats) => self.store.replace_stats(seq, stats),
            FeedPayload::Repositories(list) => self.store.replace_repositories(seq, list),
            FeedPayload::Catalog(entries) => self.store.replace_catalog(seq, entries),
            FeedPayload::SetupCheck(installed) => installed && self.gate.mark_setup_complete(),
        };
        if applied {
            debug!(event = "poll_applied", feed = %feed, seq);
        }
        applied
    }

    /// Authoritative re-read of the full repository list.
    pub async fn refresh_repositories(&mut self) -> Result<(), ApiError> {
        let seq = self.clock.next();
        let list = self.api.list_repositories().await?;
        self.store.replace_repositories(seq, list);
        Ok(())
    }

    pub async fn refresh_catalog(&mut self) -> Result<(), ApiError> {
        let seq = self.clock.next();
        let entries = self.api.list_catalog().await?;
        self.store.replace_catalog(seq, entries);
        Ok(())
    }

    pub async fn refresh_stats(&mut self) -> Result<(), ApiError> {
        let seq = self.clock.next();
        let stats = self.api.fetch_stats().await?;
        self.store.replace_stats(seq, stats);
        Ok(())
    }

    pub async fn refresh_logs(&mut self, day: Option<time::Date>) -> Result<(), ApiError> {
        let batch = self.api.fetch_logs(day).await?;
        self.store.merge_logs(&batch);
        Ok(())
    }

    /// Opens the release detail view for a repository already in the store.
    pub fn open_releases(&mut self, repository_id: i64) -> bool {
        self.store.open_release_view(repository_id)
    }

    pub fn close_releases(&mut self) {
        self.store.close_release_view();
    }

    /// Picks a version on a plugin card. See [`select_version`].
    pub async fn select_version(&mut self, plugin_id: &str, version: &str) -> VersionOutcome {
        let Some((entry, card)) = self.store.card_slot(plugin_id) else {
            debug!(event = "version_unknown_plugin", plugin_id);
            return VersionOutcome::UnknownPlugin;
        };
        select_version(&*self.api, entry, card, version).await
    }

    /// Ends the session locally: pollers stop and cached state is cleared.
    /// Returns the URL that ends it server-side.
    pub fn logout(&mut self) -> String {
        self.gate.end_session();
        self.store.clear();
        while self.updates.try_recv().is_ok() {}
        self.notices.push_info("signed out");
        self.api.logout_url()
    }
}
