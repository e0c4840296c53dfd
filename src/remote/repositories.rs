use super::*;
use super::types::{InstalledExists, WatchedUpdate};

impl RemoteClient {
    pub async fn installed_exists(&self) -> Result<bool, ApiError> {
        let req = self.request(reqwest::Method::GET, "/api/repositories/installed_exists");
        let out: InstalledExists = self.send_json(req, "setup check").await?;
        Ok(out.installed_repo_exists)
    }

    pub async fn repositories_page(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Page<Vec<RepositoryRecord>>, ApiError> {
        let req = self
            .request(reqwest::Method::GET, "/api/repositories/")
            .query(&[("page", page), ("limit", limit)]);
        self.send_json(req, "list repositories").await
    }

    /// Walks the envelope until the last page.
    pub async fn list_all_repositories(&self) -> Result<Vec<RepositoryRecord>, ApiError> {
        let mut out = Vec::new();
        let mut page = 1;
        loop {
            let resp = self.repositories_page(page, self.page_limit).await?;
            let last = page >= resp.pages || resp.items.is_empty();
            out.extend(resp.items);
            if last {
                break;
            }
            page += 1;
        }
        debug!(event = "repositories_listed", count = out.len(), pages = page);
        Ok(out)
    }

    pub async fn search_repositories(&self, query: &str) -> Result<Vec<RepositoryRecord>, ApiError> {
        let req = self
            .request(reqwest::Method::GET, "/api/repositories/search")
            .query(&[("q", query)]);
        self.send_json(req, "search repositories").await
    }

    pub async fn update_watched(
        &self,
        repository_id: i64,
        watched: bool,
    ) -> Result<RepositoryRecord, ApiError> {
        let req = self
            .request(
                reqwest::Method::PATCH,
                &format!("/api/repositories/{}/watched", repository_id),
            )
            .json(&WatchedUpdate { watched });
        self.send_json(req, "toggle watch").await
    }
}
