use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::model::{LogEntry, PluginCatalogEntry, RepositoryRecord, StatsSnapshot};
use crate::remote::ApiError;

/// A periodically refreshed server collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feed {
    Logs,
    Stats,
    Repositories,
    Catalog,
    SetupCheck,
}

impl Feed {
    pub const ALL: [Feed; 5] = [
        Feed::Logs,
        Feed::Stats,
        Feed::Repositories,
        Feed::Catalog,
        Feed::SetupCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Logs => "logs",
            Feed::Stats => "stats",
            Feed::Repositories => "repositories",
            Feed::Catalog => "catalog",
            Feed::SetupCheck => "setup_check",
        }
    }

    /// Feeds whose responses replace the stored value outright.
    pub fn is_wholesale(&self) -> bool {
        matches!(self, Feed::Stats | Feed::Repositories | Feed::Catalog)
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub enum FeedPayload {
    Logs(Vec<LogEntry>),
    Stats(StatsSnapshot),
    Repositories(Vec<RepositoryRecord>),
    Catalog(Vec<PluginCatalogEntry>),
    SetupCheck(bool),
}

impl FeedPayload {
    pub fn feed(&self) -> Feed {
        match self {
            FeedPayload::Logs(_) => Feed::Logs,
            FeedPayload::Stats(_) => Feed::Stats,
            FeedPayload::Repositories(_) => Feed::Repositories,
            FeedPayload::Catalog(_) => Feed::Catalog,
            FeedPayload::SetupCheck(_) => Feed::SetupCheck,
        }
    }
}

/// One completed fetch. `seq` was taken when the request was issued.
#[derive(Clone, Debug)]
pub struct FeedUpdate {
    pub seq: u64,
    pub payload: FeedPayload,
}

/// Monotonic issue order shared by pollers and one-off fetches.
#[derive(Clone, Debug, Default)]
pub struct RequestClock(Arc<AtomicU64>);

impl RequestClock {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Repeating fetch task for one feed: an immediate fetch, then one per interval.
///
/// At most one task exists per poller. Dropping the poller cancels it.
#[derive(Debug)]
pub struct Poller {
    feed: Feed,
    interval: Duration,
    task: Option<JoinHandle<()>>,
    starts: u64,
}

impl Poller {
    pub fn new(feed: Feed, interval: Duration) -> Self {
        Self {
            feed,
            interval,
            task: None,
            starts: 0,
        }
    }

    pub fn feed(&self) -> Feed {
        self.feed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// How many times a task has been spawned.
    pub fn starts(&self) -> u64 {
        self.starts
    }

    pub fn start<F, Fut>(&mut self, mut fetch: F, clock: RequestClock, tx: UnboundedSender<FeedUpdate>)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<FeedPayload, ApiError>> + Send + 'static,
    {
        self.stop();
        let feed = self.feed;
        let interval = self.interval;
        debug!(event = "poll_started", feed = %feed, interval_ms = interval.as_millis() as u64);

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let seq = clock.next();
                match fetch().await {
                    Ok(payload) => {
                        if tx.send(FeedUpdate { seq, payload }).is_err() {
                            debug!(event = "poll_receiver_closed", feed = %feed);
                            return;
                        }
                    }
                    Err(err) => {
                        warn!(event = "poll_failed", feed = %feed, seq, error = %err);
                    }
                }
            }
        }));
        self.starts += 1;
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(event = "poll_stopped", feed = %self.feed);
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
