use tracing::{info, warn};

use super::Console;
use crate::remote::{ApiError, ConsoleApi};

impl<A: ConsoleApi> Console<A> {
    /// Asks the server to watch or unwatch a repository, then re-reads the
    /// whole list once. The local flag is never flipped ahead of the server.
    pub async fn toggle_watch(&mut self, repository_id: i64, watched: bool) -> Result<(), ApiError> {
        let updated = match self.api.set_watched(repository_id, watched).await {
            Ok(record) => record,
            Err(err) => {
                warn!(event = "mutation_failed", op = "toggle_watch", repository_id, error = %err);
                self.notices.push_error(err.to_string());
                return Err(err);
            }
        };
        info!(event = "watch_toggled", repository_id, watched = updated.watched);

        let name = updated.full_name.clone();
        let now_watched = updated.watched;
        if let Err(err) = self.refresh_repositories().await {
            warn!(event = "refetch_failed", op = "toggle_watch", repository_id, error = %err);
            let seq = self.clock.next();
            self.store.replace_repository(seq, updated);
        }

        let verb = if now_watched { "watching" } else { "stopped watching" };
        self.notices.push_info(format!("{} {}", verb, name));
        Ok(())
    }

    /// Shows or hides one release. On success every copy of that release in
    /// the store takes the server-confirmed flag; nothing else is touched.
    pub async fn toggle_visible(&mut self, release_id: i64, visible: bool) -> Result<usize, ApiError> {
        let ack = match self.api.set_visible(release_id, visible).await {
            Ok(ack) => ack,
            Err(err) => {
                warn!(event = "mutation_failed", op = "toggle_visible", release_id, error = %err);
                self.notices.push_error(err.to_string());
                return Err(err);
            }
        };
        let confirmed = ack.visible.unwrap_or(visible);
        let seq = self.clock.next();
        let hits = self.store.patch_release_visible(seq, release_id, confirmed);
        info!(event = "visibility_toggled", release_id, visible = confirmed, hits);

        let verb = if confirmed { "published" } else { "hid" };
        self.notices.push_info(format!("{} release {}", verb, release_id));
        Ok(hits)
    }
}
