use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use super::poller::{Feed, FeedPayload, FeedUpdate, Poller, RequestClock};
use crate::model::{AuthorRef, PollIntervals};
use crate::remote::ConsoleApi;

/// Whether the signed-in author has the app installed on any repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupState {
    Pending,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Identity probe not performed yet.
    Unknown,
    Anonymous,
    Authenticated {
        identity: AuthorRef,
        setup: SetupState,
    },
}

impl SessionPhase {
    pub fn identity(&self) -> Option<&AuthorRef> {
        match self {
            SessionPhase::Authenticated { identity, .. } => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated { .. })
    }

    pub fn is_setup_pending(&self) -> bool {
        matches!(
            self,
            SessionPhase::Authenticated {
                setup: SetupState::Pending,
                ..
            }
        )
    }
}

/// The screen currently on display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Repositories,
    Store,
}

struct Pollers {
    logs: Poller,
    stats: Poller,
    repositories: Poller,
    catalog: Poller,
    setup: Poller,
}

impl Pollers {
    fn get(&self, feed: Feed) -> &Poller {
        match feed {
            Feed::Logs => &self.logs,
            Feed::Stats => &self.stats,
            Feed::Repositories => &self.repositories,
            Feed::Catalog => &self.catalog,
            Feed::SetupCheck => &self.setup,
        }
    }

    fn get_mut(&mut self, feed: Feed) -> &mut Poller {
        match feed {
            Feed::Logs => &mut self.logs,
            Feed::Stats => &mut self.stats,
            Feed::Repositories => &mut self.repositories,
            Feed::Catalog => &mut self.catalog,
            Feed::SetupCheck => &mut self.setup,
        }
    }
}

/// Session state machine plus the pollers it gates.
///
/// A feed's poller runs exactly while its condition holds: logs and stats on
/// the dashboard, repositories on the repository view, catalog on the store
/// view (all three only when signed in), setup check while setup is pending.
pub struct SessionGate<A: ConsoleApi> {
    api: Arc<A>,
    clock: RequestClock,
    tx: UnboundedSender<FeedUpdate>,
    phase: SessionPhase,
    view: Option<View>,
    pollers: Pollers,
}

impl<A: ConsoleApi> SessionGate<A> {
    pub fn new(
        api: Arc<A>,
        clock: RequestClock,
        tx: UnboundedSender<FeedUpdate>,
        intervals: &PollIntervals,
    ) -> Self {
        Self {
            api,
            clock,
            tx,
            phase: SessionPhase::Unknown,
            view: None,
            pollers: Pollers {
                logs: Poller::new(Feed::Logs, intervals.logs()),
                stats: Poller::new(Feed::Stats, intervals.stats()),
                repositories: Poller::new(Feed::Repositories, intervals.repositories()),
                catalog: Poller::new(Feed::Catalog, intervals.catalog()),
                setup: Poller::new(Feed::SetupCheck, intervals.setup()),
            },
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn view(&self) -> Option<View> {
        self.view
    }

    pub fn poller(&self, feed: Feed) -> &Poller {
        self.pollers.get(feed)
    }

    pub fn is_polling(&self, feed: Feed) -> bool {
        self.pollers.get(feed).is_running()
    }

    /// Identity probe followed, when signed in, by the one-shot setup check.
    /// Runs once; later calls return the settled phase.
    pub async fn establish(&mut self) -> &SessionPhase {
        if self.phase != SessionPhase::Unknown {
            return &self.phase;
        }

        self.phase = match self.api.current_author().await {
            Ok(identity) => {
                info!(event = "session_authenticated", login = %identity.login);
                let setup = match self.api.installed_repo_exists().await {
                    Ok(true) => SetupState::Complete,
                    Ok(false) => SetupState::Pending,
                    Err(err) => {
                        warn!(event = "setup_check_failed", error = %err);
                        SetupState::Pending
                    }
                };
                if setup == SetupState::Pending {
                    info!(event = "setup_pending", login = %identity.login);
                }
                SessionPhase::Authenticated { identity, setup }
            }
            Err(err) => {
                if err.is_unauthorized() {
                    debug!(event = "identity_probe_rejected", error = %err);
                } else {
                    warn!(event = "identity_probe_failed", error = %err);
                }
                info!(event = "session_anonymous");
                SessionPhase::Anonymous
            }
        };

        self.sync_pollers();
        &self.phase
    }

    pub fn set_view(&mut self, view: Option<View>) {
        if self.view != view {
            debug!(event = "view_changed", from = ?self.view, to = ?view);
        }
        self.view = view;
        self.sync_pollers();
    }

    /// Moves a pending session to complete. Returns false when it was not pending.
    pub fn mark_setup_complete(&mut self) -> bool {
        let SessionPhase::Authenticated { setup, identity } = &mut self.phase else {
            return false;
        };
        if *setup != SetupState::Pending {
            return false;
        }
        *setup = SetupState::Complete;
        info!(event = "setup_complete", login = %identity.login);
        self.sync_pollers();
        true
    }

    /// Drops the session: every poller stops and the phase becomes anonymous.
    pub fn end_session(&mut self) {
        if let Some(identity) = self.phase.identity() {
            info!(event = "session_ended", login = %identity.login);
        }
        self.phase = SessionPhase::Anonymous;
        self.sync_pollers();
    }

    fn wants(&self, feed: Feed) -> bool {
        let signed_in = self.phase.is_authenticated();
        match feed {
            Feed::Logs | Feed::Stats => signed_in && self.view == Some(View::Dashboard),
            Feed::Repositories => signed_in && self.view == Some(View::Repositories),
            Feed::Catalog => signed_in && self.view == Some(View::Store),
            Feed::SetupCheck => self.phase.is_setup_pending(),
        }
    }

    /// Starts pollers whose condition became true, stops those whose became false.
    fn sync_pollers(&mut self) {
        for feed in Feed::ALL {
            let wanted = self.wants(feed);
            let running = self.pollers.get(feed).is_running();
            if wanted && !running {
                self.start_feed(feed);
            } else if !wanted && running {
                self.pollers.get_mut(feed).stop();
            }
        }
    }

    fn start_feed(&mut self, feed: Feed) {
        let clock = self.clock.clone();
        let tx = self.tx.clone();
        let api = Arc::clone(&self.api);
        let poller = self.pollers.get_mut(feed);
        match feed {
            Feed::Logs => poller.start(
                move || {
                    let api = Arc::clone(&api);
                    async move { api.fetch_logs(None).await.map(FeedPayload::Logs) }
                },
                clock,
                tx,
            ),
            Feed::Stats => poller.start(
                move || {
                    let api = Arc::clone(&api);
                    async move { api.fetch_stats().await.map(FeedPayload::Stats) }
                },
                clock,
                tx,
            ),
            Feed::Repositories => poller.start(
                move || {
                    let api = Arc::clone(&api);
                    async move {
                        api.list_repositories()
                            .await
                            .map(FeedPayload::Repositories)
                    }
                },
                clock,
                tx,
            ),
            Feed::Catalog => poller.start(
                move || {
                    let api = Arc::clone(&api);
                    async move { api.list_catalog().await.map(FeedPayload::Catalog) }
                },
                clock,
                tx,
            ),
            Feed::SetupCheck => poller.start(
                move || {
                    let api = Arc::clone(&api);
                    async move {
                        api.installed_repo_exists()
                            .await
                            .map(FeedPayload::SetupCheck)
                    }
                },
                clock,
                tx,
            ),
        }
    }
}
