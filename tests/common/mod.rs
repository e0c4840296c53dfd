#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;

use pluginwarden_console::model::{
    AuthorRef, ConsoleConfig, LogEntry, LogLevel, PluginCatalogEntry, PluginRecord, ReleaseRecord,
    RepositoryRecord, StatsSnapshot,
};
use pluginwarden_console::remote::{ApiError, ConsoleApi, VisibilityAck};

/// Server-side truth the fake serves, plus call bookkeeping.
#[derive(Default)]
pub struct FakeState {
    /// `None` answers the identity probe with 401.
    pub identity: Option<AuthorRef>,
    pub installed: bool,
    pub repositories: Vec<RepositoryRecord>,
    pub catalog: Vec<PluginCatalogEntry>,
    pub logs: Vec<LogEntry>,
    pub stats: StatsSnapshot,
    pub versions: HashMap<(String, String), PluginRecord>,
    /// Operation names that answer 500.
    pub failing: HashSet<&'static str>,
    pub calls: HashMap<&'static str, usize>,
}

pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new(state: FakeState) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
        })
    }

    pub fn calls(&self, op: &str) -> usize {
        self.lock().calls.get(op).copied().unwrap_or(0)
    }

    pub fn update(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.lock());
    }

    pub fn fail(&self, op: &'static str) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: &'static str) {
        self.lock().failing.remove(op);
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn enter(&self, op: &'static str) -> Result<MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.lock();
        *state.calls.entry(op).or_insert(0) += 1;
        if state.failing.contains(op) {
            return Err(ApiError::status(op, 500));
        }
        Ok(state)
    }
}

impl ConsoleApi for FakeApi {
    async fn current_author(&self) -> Result<AuthorRef, ApiError> {
        let state = self.enter("current_author")?;
        state
            .identity
            .clone()
            .ok_or_else(|| ApiError::status("identity probe", 401))
    }

    async fn installed_repo_exists(&self) -> Result<bool, ApiError> {
        Ok(self.enter("installed_repo_exists")?.installed)
    }

    async fn list_repositories(&self) -> Result<Vec<RepositoryRecord>, ApiError> {
        Ok(self.enter("list_repositories")?.repositories.clone())
    }

    async fn set_watched(&self, repository_id: i64, watched: bool) -> Result<RepositoryRecord, ApiError> {
        let mut state = self.enter("set_watched")?;
        let repo = state
            .repositories
            .iter_mut()
            .find(|r| r.id == repository_id)
            .ok_or_else(|| ApiError::status("toggle watch", 404))?;
        repo.watched = watched;
        Ok(repo.clone())
    }

    async fn set_visible(&self, release_id: i64, visible: bool) -> Result<VisibilityAck, ApiError> {
        let mut state = self.enter("set_visible")?;
        for repo in state.repositories.iter_mut() {
            repo.set_release_visible(release_id, visible);
        }
        Ok(VisibilityAck {
            id: release_id,
            visible: Some(visible),
        })
    }

    async fn fetch_logs(&self, _day: Option<time::Date>) -> Result<Vec<LogEntry>, ApiError> {
        Ok(self.enter("fetch_logs")?.logs.clone())
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        Ok(self.enter("fetch_stats")?.stats)
    }

    async fn list_catalog(&self) -> Result<Vec<PluginCatalogEntry>, ApiError> {
        Ok(self.enter("list_catalog")?.catalog.clone())
    }

    async fn resolve_version(&self, plugin_id: &str, version: &str) -> Result<PluginRecord, ApiError> {
        let state = self.enter("resolve_version")?;
        state
            .versions
            .get(&(plugin_id.to_string(), version.to_string()))
            .cloned()
            .ok_or_else(|| ApiError::status("resolve version", 404))
    }

    fn logout_url(&self) -> String {
        "http://fake/api/auth/logout".to_string()
    }
}

pub fn author(login: &str) -> AuthorRef {
    AuthorRef {
        id: 1,
        login: login.to_string(),
        avatar_url: String::new(),
        html_url: format!("https://github.com/{}", login),
        kind: "User".to_string(),
    }
}

pub fn release(id: i64, visible: bool) -> ReleaseRecord {
    ReleaseRecord {
        id,
        tag_name: format!("v{}", id),
        name: None,
        body: None,
        draft: false,
        prerelease: false,
        published_at: None,
        html_url: String::new(),
        visible,
        assets: Vec::new(),
    }
}

pub fn repo(id: i64, name: &str, watched: bool, releases: Vec<ReleaseRecord>) -> RepositoryRecord {
    RepositoryRecord {
        id,
        name: name.to_string(),
        full_name: format!("octo/{}", name),
        html_url: String::new(),
        watched,
        author: Some(author("octo")),
        releases,
    }
}

pub fn plugin(id: &str, version: &str) -> PluginRecord {
    PluginRecord {
        id: id.to_string(),
        name: id.to_uppercase(),
        version: version.to_string(),
        ..PluginRecord::default()
    }
}

pub fn catalog_entry(id: &str, default_version: &str, versions: &[&str]) -> PluginCatalogEntry {
    PluginCatalogEntry::new(
        plugin(id, default_version),
        versions.iter().map(|v| v.to_string()).collect(),
    )
}

pub fn log(id: u32, message: &str) -> LogEntry {
    LogEntry {
        id: id.to_string(),
        timestamp: "12:00:00".to_string(),
        level: LogLevel::Info,
        message: message.to_string(),
    }
}

/// Signed in, setup complete, two repositories and one plugin.
pub fn signed_in_state() -> FakeState {
    FakeState {
        identity: Some(author("octo")),
        installed: true,
        repositories: vec![
            repo(10, "alpha", false, vec![release(100, true), release(101, false)]),
            repo(20, "beta", true, vec![release(200, true)]),
        ],
        catalog: vec![catalog_entry("hello", "1.2.0", &["1.2.0", "1.1.0", "1.0.0"])],
        stats: StatsSnapshot {
            total_plugins: 1,
            installed_repos: 2,
            watched_repos: 1,
        },
        ..FakeState::default()
    }
}

pub fn test_config() -> ConsoleConfig {
    ConsoleConfig::default()
}

/// One request as the recording server saw it.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<serde_json::Value>,
    pub authorization: Option<String>,
}

/// In-process HTTP server that records every request and answers from
/// per-route queues (the last queued reply repeats).
#[derive(Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<Recorded>>>,
    replies: Arc<Mutex<HashMap<(String, String), VecDeque<(u16, serde_json::Value)>>>>,
}

impl Recorder {
    pub fn reply(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.replies
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, method: &str, path: &str) -> (u16, serde_json::Value) {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(&(method.to_string(), path.to_string())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or((404, serde_json::Value::Null)),
            Some(queue) => queue.front().cloned().unwrap_or((404, serde_json::Value::Null)),
            None => (404, serde_json::json!({ "detail": "Not Found" })),
        }
    }
}

async fn record(
    State(rec): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let entry = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    rec.requests.lock().unwrap().push(entry);

    let (status, reply) = rec.next_reply(method.as_str(), uri.path());
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, axum::Json(reply))
}

/// Binds `127.0.0.1:0` and returns the base URL.
pub async fn spawn_recorder(rec: Recorder) -> Result<String> {
    let app = Router::new().fallback(record).with_state(rec);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind recorder")?;
    let addr = listener.local_addr().context("recorder addr")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{}", addr))
}
