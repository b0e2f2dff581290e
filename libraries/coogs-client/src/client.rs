//! Main Coogs API client.

use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the Coogs Music REST API.
///
/// The backend trusts account identifiers sent as plain request parameters,
/// so the client holds no credentials. Every call is a single attempt; there
/// are no retries.
///
/// Cloning is cheap and clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// use coogs_client::{ClientConfig, CoogsClient};
/// use coogs_core::ListenerId;
///
/// let client = CoogsClient::new(ClientConfig::new("https://api.coogs.example"))?;
/// let profile = client.listener_profile(ListenerId::new(7)).await?;
/// println!("Hello {}", profile.username);
/// ```
#[derive(Debug, Clone)]
pub struct CoogsClient {
    pub(crate) http: Client,
    base_url: String,
}

impl CoogsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("CoogsMusic/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(url = %base_url, timeout = ?config.timeout, "Created API client");

        Ok(Self { http, base_url })
    }

    /// Base URL without trailing slash.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(ClientError::from_send)
    }
}

/// Validate and normalize a base URL.
fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let parsed = Url::parse(trimmed).map_err(|e| {
        ClientError::InvalidUrl(format!(
            "{} ({}); URL must start with http:// or https://",
            trimmed, e
        ))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl(format!(
            "URL must start with http:// or https://, got {}://",
            parsed.scheme()
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Decode a JSON body from a successful response.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(server_error(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {} response: {}", what, e)))
}

/// Succeed on any 2xx status.
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(server_error(response).await)
    }
}

/// Map a non-success response to an error, keeping the body as message.
pub(crate) async fn server_error(response: Response) -> ClientError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();

    if status == StatusCode::NOT_FOUND {
        ClientError::NotFound(message)
    } else {
        ClientError::Server {
            status: status.as_u16(),
            message,
        }
    }
}
