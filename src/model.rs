mod catalog;
mod config;
mod log;
mod page;
mod repository;
mod stats;

pub use self::catalog::{
    AffiliationTag, PluginCatalogEntry, PluginDependency, PluginManage, PluginRecord,
};
pub use self::config::{ConsoleConfig, PollIntervals};
pub use self::log::{LogEntry, LogLevel};
pub use self::page::Page;
pub use self::repository::{AssetRecord, AuthorRef, ReleaseRecord, RepositoryRecord};
pub use self::stats::StatsSnapshot;
