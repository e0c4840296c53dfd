use serde::{Deserialize, Serialize};

/// Dashboard counters. Replaced wholesale on every fetch; missing fields read as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSnapshot {
    pub total_plugins: u64,
    pub installed_repos: u64,
    pub watched_repos: u64,
}
