use super::*;
use super::types::VisibleUpdate;

impl RemoteClient {
    pub async fn update_visible(
        &self,
        release_id: i64,
        visible: bool,
    ) -> Result<VisibilityAck, ApiError> {
        let req = self
            .request(
                reqwest::Method::PATCH,
                &format!("/api/releases/{}/visible", release_id),
            )
            .json(&VisibleUpdate { visible });
        self.send_json(req, "toggle visibility").await
    }
}
