//! HTTP client for the storefront's color-variants endpoint.

mod profile;

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use variantdesk_core::AppConfig;

use crate::error::FetchError;

/// Issues a single GET per call with a fixed browser header/cookie profile.
///
/// There is no retry policy: a non-2xx status or transport failure is
/// returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct VariantsClient {
    client: Client,
}

impl VariantsClient {
    /// Creates a `VariantsClient` with the given whole-request and connect
    /// timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, connect_timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .default_headers(profile::browser_headers())
            .build()?;
        Ok(Self { client })
    }

    /// Builds a client from the request and connect timeouts in `config`.
    ///
    /// # Errors
    ///
    /// See [`VariantsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(config.request_timeout_secs, config.connect_timeout_secs)
    }

    /// Fetches the raw response body of `url`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::UnexpectedStatus`]: any non-2xx status.
    /// - [`FetchError::Http`]: invalid URL, network/TLS failure, timeout, or
    ///   a body that could not be read.
    pub async fn fetch_body(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetches `url` and parses the body with [`parse_payload`].
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::fetch_body`] and [`parse_payload`].
    pub async fn fetch_payload(&self, url: &str) -> Result<Value, FetchError> {
        let body = self.fetch_body(url).await?;
        parse_payload(url, &body)
    }
}

/// Parses a response body as JSON.
///
/// The body is first decoded as JSON bytes. If that fails it is re-read as
/// (lossy) UTF-8 text with a leading byte-order mark and surrounding
/// whitespace removed, and parsed again.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] with the error of the text attempt when
/// neither parse succeeds.
pub fn parse_payload(url: &str, body: &[u8]) -> Result<Value, FetchError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => Ok(value),
        Err(first) => {
            tracing::debug!(url, error = %first, "structured JSON parse failed; retrying as text");
            let text = String::from_utf8_lossy(body);
            let trimmed = text.trim_start_matches('\u{feff}').trim();
            serde_json::from_str::<Value>(trimmed).map_err(|source| FetchError::Parse {
                url: url.to_owned(),
                source,
            })
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
