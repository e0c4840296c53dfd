//! HTTP boundary to the plugin-warden server.

use anyhow::{Context, Result};
use tracing::debug;

use crate::model::{
    AuthorRef, ConsoleConfig, LogEntry, Page, PluginCatalogEntry, PluginRecord, RepositoryRecord,
    StatsSnapshot,
};

mod api;
mod error;
mod feeds;
mod http_client;
mod identity;
mod releases;
mod repositories;
mod store;
mod types;

pub use self::api::ConsoleApi;
pub use self::error::ApiError;
pub use self::types::{RawLogRecord, VisibilityAck, display_time};

pub struct RemoteClient {
    base_url: String,
    token: Option<String>,
    page_limit: u32,
    catalog_limit: u32,
    client: reqwest::Client,
}

impl RemoteClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pluginwarden-console/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            page_limit: config.page_limit,
            catalog_limit: config.catalog_limit,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
