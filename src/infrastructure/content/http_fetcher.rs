//! HTTP adapter for the content-by-id API.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::{Client, Response, header};
use tracing::{debug, warn};

use crate::domain::entities::{InscriptionId, RawPayload};
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentFetchPort;
use crate::infrastructure::config::ApiConfig;

/// Placeholder substituted with the inscription number in `content_path`.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Fetches raw inscription content over HTTP.
pub struct HttpContentFetcher {
    client: Client,
    base_url: String,
    content_path: String,
    max_payload_bytes: u64,
}

impl HttpContentFetcher {
    /// Creates a fetcher from API settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ContentError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| ContentError::fetch(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            content_path: config.content_path.clone(),
            max_payload_bytes: config.max_payload_bytes,
        })
    }

    /// Reads the body chunk by chunk, stopping as soon as it exceeds the limit.
    async fn read_body(&self, mut response: Response) -> Result<Bytes, ContentError> {
        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ContentError::fetch(format!("failed to read body: {e}")))?
        {
            body.extend_from_slice(&chunk);
            if body.len() as u64 > self.max_payload_bytes {
                return Err(ContentError::fetch(format!(
                    "payload exceeds limit of {} bytes",
                    self.max_payload_bytes
                )));
            }
        }
        Ok(body.freeze())
    }

    /// Absolute URL serving `id`.
    #[must_use]
    pub fn url_for(&self, id: InscriptionId) -> String {
        let path = self.content_path.replace(ID_PLACEHOLDER, &id.to_string());
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl std::fmt::Debug for HttpContentFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpContentFetcher")
            .field("base_url", &self.base_url)
            .field("content_path", &self.content_path)
            .field("max_payload_bytes", &self.max_payload_bytes)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ContentFetchPort for HttpContentFetcher {
    async fn fetch(&self, id: InscriptionId) -> Result<RawPayload, ContentError> {
        let url = self.url_for(id);
        debug!(id = %id, url = %url, "Fetching inscription content");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(id = %id, error = %e, "Content request failed");
            if e.is_timeout() {
                ContentError::fetch("request timed out")
            } else if e.is_connect() {
                ContentError::fetch("failed to connect to content API")
            } else {
                ContentError::fetch(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::fetch(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        if let Some(len) = response.content_length()
            && len > self.max_payload_bytes
        {
            return Err(ContentError::fetch(format!(
                "payload of {len} bytes exceeds limit of {} bytes",
                self.max_payload_bytes
            )));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        let bytes = self.read_body(response).await?;

        debug!(
            id = %id,
            len = bytes.len(),
            content_type = content_type.as_deref().unwrap_or("-"),
            "Content fetched"
        );

        Ok(RawPayload::new(id, bytes, content_type))
    }

    fn content_url(&self, id: InscriptionId) -> Option<String> {
        Some(self.url_for(id))
    }
}
