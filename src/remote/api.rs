use std::future::Future;

use time::Date;

use super::*;

/// The operations the console core needs from the server.
///
/// `RemoteClient` is the production implementation; anything else (an
/// in-memory double, a recording proxy) can stand in for it.
pub trait ConsoleApi: Send + Sync + 'static {
    /// Identity probe. Any error means "not signed in".
    fn current_author(&self) -> impl Future<Output = Result<AuthorRef, ApiError>> + Send;

    /// Whether the signed-in author has at least one repository with the app installed.
    fn installed_repo_exists(&self) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// The complete repository collection (every page).
    fn list_repositories(
        &self,
    ) -> impl Future<Output = Result<Vec<RepositoryRecord>, ApiError>> + Send;

    fn set_watched(
        &self,
        repository_id: i64,
        watched: bool,
    ) -> impl Future<Output = Result<RepositoryRecord, ApiError>> + Send;

    fn set_visible(
        &self,
        release_id: i64,
        visible: bool,
    ) -> impl Future<Output = Result<VisibilityAck, ApiError>> + Send;

    /// Event-log batch, oldest first. `None` asks for the server's default day.
    fn fetch_logs(
        &self,
        day: Option<Date>,
    ) -> impl Future<Output = Result<Vec<LogEntry>, ApiError>> + Send;

    fn fetch_stats(&self) -> impl Future<Output = Result<StatsSnapshot, ApiError>> + Send;

    fn list_catalog(
        &self,
    ) -> impl Future<Output = Result<Vec<PluginCatalogEntry>, ApiError>> + Send;

    fn resolve_version(
        &self,
        plugin_id: &str,
        version: &str,
    ) -> impl Future<Output = Result<PluginRecord, ApiError>> + Send;

    /// Where the browser goes to end the server-side session.
    fn logout_url(&self) -> String;
}

impl ConsoleApi for RemoteClient {
    fn current_author(&self) -> impl Future<Output = Result<AuthorRef, ApiError>> + Send {
        self.me()
    }

    fn installed_repo_exists(&self) -> impl Future<Output = Result<bool, ApiError>> + Send {
        self.installed_exists()
    }

    fn list_repositories(
        &self,
    ) -> impl Future<Output = Result<Vec<RepositoryRecord>, ApiError>> + Send {
        self.list_all_repositories()
    }

    fn set_watched(
        &self,
        repository_id: i64,
        watched: bool,
    ) -> impl Future<Output = Result<RepositoryRecord, ApiError>> + Send {
        self.update_watched(repository_id, watched)
    }

    fn set_visible(
        &self,
        release_id: i64,
        visible: bool,
    ) -> impl Future<Output = Result<VisibilityAck, ApiError>> + Send {
        self.update_visible(release_id, visible)
    }

    fn fetch_logs(
        &self,
        day: Option<Date>,
    ) -> impl Future<Output = Result<Vec<LogEntry>, ApiError>> + Send {
        self.webhook_logs(day)
    }

    fn fetch_stats(&self) -> impl Future<Output = Result<StatsSnapshot, ApiError>> + Send {
        self.stats()
    }

    fn list_catalog(
        &self,
    ) -> impl Future<Output = Result<Vec<PluginCatalogEntry>, ApiError>> + Send {
        async move {
            let page = self.catalog_page(1, self.catalog_limit).await?;
            Ok(page.items)
        }
    }

    fn resolve_version(
        &self,
        plugin_id: &str,
        version: &str,
    ) -> impl Future<Output = Result<PluginRecord, ApiError>> + Send {
        self.plugin_version(plugin_id, version)
    }

    fn logout_url(&self) -> String {
        RemoteClient::logout_url(self)
    }
}
