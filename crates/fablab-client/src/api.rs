//! Shared HTTP plumbing for the FabLab REST backend.

use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use tracing::info;

use crate::config::ClientConfig;
use fablab_core::{Error, LanguageTag, Result};

/// HTTP client for the FabLab backend.
///
/// Holds one shared connection pool for all API groups (sources, assist,
/// tools). Cheap to clone would be unnecessary: one instance is shared by
/// reference across a session's lifetime.
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    language: LanguageTag,
}

impl ApiClient {
    /// Create a client from a validated configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = config.base_url.trim_end_matches('/').to_string();

        info!(
            subsystem = "client",
            base_url = %base_url,
            authenticated = config.api_key.is_some(),
            "Initializing FabLab API client"
        );

        Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(&ClientConfig::from_env())
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Display language configured for this client.
    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    /// Build a request against an API path, attaching bearer auth when a key
    /// is configured.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Map a non-success response into the client error taxonomy, reading
    /// the body as the message.
    pub(crate) async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            404 => Error::NotFound(message),
            403 => Error::Forbidden(message),
            code => Error::Backend {
                status: code,
                message,
            },
        })
    }
}
