use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const ENV_URL: &str = "PLUGINWARDEN_URL";
pub const ENV_TOKEN: &str = "PLUGINWARDEN_TOKEN";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollIntervals {
    pub logs_secs: u64,
    pub stats_secs: u64,
    pub repositories_secs: u64,
    pub catalog_secs: u64,
    pub setup_secs: u64,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            logs_secs: 5,
            stats_secs: 10,
            repositories_secs: 10,
            catalog_secs: 30,
            setup_secs: 1,
        }
    }
}

impl PollIntervals {
    pub fn logs(&self) -> Duration {
        Duration::from_secs(self.logs_secs)
    }

    pub fn stats(&self) -> Duration {
        Duration::from_secs(self.stats_secs)
    }

    pub fn repositories(&self) -> Duration {
        Duration::from_secs(self.repositories_secs)
    }

    pub fn catalog(&self) -> Duration {
        Duration::from_secs(self.catalog_secs)
    }

    pub fn setup(&self) -> Duration {
        Duration::from_secs(self.setup_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Page size used when walking the repository list.
    pub page_limit: u32,
    /// Page size used for the plugin catalog.
    pub catalog_limit: u32,
    pub request_timeout_secs: u64,

    pub intervals: PollIntervals,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            token: None,
            page_limit: 100,
            catalog_limit: 30,
            request_timeout_secs: 15,
            intervals: PollIntervals::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("pluginwarden")
                .join("console.json"),
        )
    }

    pub fn read(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config {}", path.display()))?;
        let cfg: ConsoleConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(cfg)
    }

    /// Defaults, then the explicit (or default-location) file, then the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut cfg = match explicit {
            Some(path) => Self::read(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::read(&path)?,
                _ => Self::default(),
            },
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("base_url must start with http:// or https:// (got {})", url);
        }
        if !(1..=1000).contains(&self.page_limit) {
            anyhow::bail!("page_limit must be within 1..=1000 (got {})", self.page_limit);
        }
        if !(1..=200).contains(&self.catalog_limit) {
            anyhow::bail!(
                "catalog_limit must be within 1..=200 (got {})",
                self.catalog_limit
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be > 0");
        }
        let iv = &self.intervals;
        for (name, secs) in [
            ("logs_secs", iv.logs_secs),
            ("stats_secs", iv.stats_secs),
            ("repositories_secs", iv.repositories_secs),
            ("catalog_secs", iv.catalog_secs),
            ("setup_secs", iv.setup_secs),
        ] {
            if secs == 0 {
                anyhow::bail!("intervals.{} must be > 0", name);
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
#[path = "../tests/model/config_tests.rs"]
mod tests;
