//! HTTP client for the rendering service, built on [`reqwest`].

use super::{RenderBackend, RenderError, RenderKind, RenderRequest, RenderResult};

/// Client for a single rendering service instance.
#[derive(Debug, Clone)]
pub struct HttpRenderClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRenderClient {
    /// * `base_url` - Service origin, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuses an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, kind: RenderKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    /// Returns the response unchanged on 2xx, or a [`RenderError::Status`]
    /// carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> RenderResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RenderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl RenderBackend for HttpRenderClient {
    async fn render(&self, kind: RenderKind, request: &RenderRequest) -> RenderResult<Vec<u8>> {
        let url = self.endpoint(kind);
        tracing::debug!(%url, image_url = %request.image_url, "sending render request");

        let response = self.client.post(&url).json(request).send().await?;
        let response = Self::ensure_success(response).await?;
        let payload = response.bytes().await?;

        tracing::debug!(%url, bytes = payload.len(), "render response received");
        Ok(payload.to_vec())
    }
}
