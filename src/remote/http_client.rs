use serde::de::DeserializeOwned;

use super::*;

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder with the bearer token attached when one is configured.
    pub(super) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match self.token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(super) async fn send(
        &self,
        req: reqwest::RequestBuilder,
        label: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = req.send().await.map_err(|source| ApiError::Transport {
            label: label.to_string(),
            source,
        })?;
        ensure_ok(resp, label)
    }

    pub(super) async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        label: &str,
    ) -> Result<T, ApiError> {
        let resp = self.send(req, label).await?;
        decode(resp, label).await
    }
}

pub(super) fn ensure_ok(
    resp: reqwest::Response,
    label: &str,
) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    debug!(event = "http_status", op = label, status = status.as_u16());
    Err(ApiError::status(label, status.as_u16()))
}

pub(super) async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
    label: &str,
) -> Result<T, ApiError> {
    let bytes = resp.bytes().await.map_err(|source| ApiError::Transport {
        label: label.to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode {
        label: label.to_string(),
        message: err.to_string(),
    })
}
