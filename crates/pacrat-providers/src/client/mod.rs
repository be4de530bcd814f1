//! Shared HTTP transport for provider adapters.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;

use pacrat_core::{Index, PacratError};

use crate::ProviderResult;

/// User-Agent sent upstream unless overridden
pub const DEFAULT_USER_AGENT: &str =
    "ModelContextProtocol/1.0 Pacman (+https://github.com/modelcontextprotocol/servers)";

/// Per-request timeout applied to every upstream call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the shared transport
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User-Agent header value for all upstream requests
    pub user_agent: String,
    /// Bounded timeout covering connect and body read
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client shared by all provider adapters.
///
/// Wraps a pooled reqwest client. Every request carries the configured
/// User-Agent, a JSON Accept header, and the bounded timeout; redirects are
/// followed. Requests are never retried; a failure surfaces on the first
/// attempt.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new transport with connection pooling
    pub fn new(config: &ClientConfig) -> ProviderResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(config.timeout)
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                let message = format!("failed to create HTTP client: {e}");
                PacratError::network(message, e)
            })?;

        Ok(HttpClient { client })
    }

    /// Issue a GET against `index` and decode the JSON body into `T`.
    ///
    /// Any non-200 status is an upstream failure. Transport errors,
    /// timeouts included, map to the same internal-failure category. A body
    /// that decodes but does not match `T` is a parse failure.
    pub async fn get_json<T>(
        &self,
        index: Index,
        url: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.get(index, url, query).await?;
        response.json::<T>().await.map_err(|e| PacratError::Parse {
            index,
            message: e.to_string(),
        })
    }

    /// Issue a GET against `index` and return the body as text.
    ///
    /// Used for the one endpoint (PyPI search) that answers with HTML;
    /// status classification is identical to [`HttpClient::get_json`].
    pub async fn get_text(
        &self,
        index: Index,
        url: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<String> {
        let response = self.get(index, url, query).await?;
        response.text().await.map_err(|e| PacratError::Parse {
            index,
            message: e.to_string(),
        })
    }

    async fn get(
        &self,
        index: Index,
        url: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let message = format!("request to {index} failed: {e}");
                PacratError::network(message, e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PacratError::UpstreamStatus {
                index,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
