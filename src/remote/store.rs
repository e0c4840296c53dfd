use super::*;
use super::types::{CatalogItems, ResolveVersionRequest};

impl RemoteClient {
    pub async fn catalog_page(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Page<Vec<PluginCatalogEntry>>, ApiError> {
        let req = self
            .request(reqwest::Method::GET, "/api/store/plugins")
            .query(&[("page", page), ("limit", limit)]);
        let raw: Page<CatalogItems> = self.send_json(req, "list catalog").await?;
        Ok(Page {
            total: raw.total,
            page: raw.page,
            limit: raw.limit,
            pages: raw.pages,
            items: raw.items.into_entries(),
        })
    }

    pub async fn plugin_version(
        &self,
        plugin_id: &str,
        version: &str,
    ) -> Result<PluginRecord, ApiError> {
        let req = self
            .request(reqwest::Method::POST, "/api/store/plugins/version")
            .json(&ResolveVersionRequest { plugin_id, version });
        self.send_json(req, "resolve version").await
    }
}
