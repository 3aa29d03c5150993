//! Client for the external `/generate` endpoint
//!
//! Performs a single POST per invocation and classifies every failure into a
//! [`RelayError`] variant. No retries.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tracing::{error, info, warn};
use url::Url;

use crate::core::config::{AppConfig, ENDPOINT_VAR, request_timeout_from_env};
use crate::errors::RelayError;

pub const GENERATE_PATH: &str = "/generate";

/// Sent in place of the caller's message; the endpoint currently receives a fixed payload.
pub const OUTBOUND_MESSAGE: &str = "From Lambda";

const UNREADABLE_BODY: &str = "(failed to read response body)";
#[cfg_attr(feature = "debug-logs", allow(dead_code))]
const LOG_PREVIEW_CHARS: usize = 300;

/// Source of assistant replies for the request handler.
#[async_trait]
pub trait ReplyBackend: Send + Sync {
    /// Returns the parsed JSON body produced for `message`.
    async fn generate(&self, config: &AppConfig, message: &str) -> Result<Value, RelayError>;
}

/// HTTP implementation of [`ReplyBackend`]. Built once per process and
/// passed by reference into every invocation.
#[derive(Debug, Clone)]
pub struct GenerateClient {
    http: Client,
}

impl GenerateClient {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Builds the underlying HTTP client, applying `EXTERNAL_API_TIMEOUT_SECS`
    /// when it is set.
    pub fn from_env() -> Result<Self, RelayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout_from_env() {
            info!(timeout_secs = timeout.as_secs(), "Using external API request timeout");
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            RelayError::Unclassified(format!("Failed to build external API HTTP client: {e}"))
        })?;
        Ok(Self::new(http))
    }
}

#[async_trait]
impl ReplyBackend for GenerateClient {
    async fn generate(&self, config: &AppConfig, message: &str) -> Result<Value, RelayError> {
        let base = config.require_endpoint().inspect_err(|e| {
            error!(category = e.category(), "{}", e);
        })?;
        let target = build_target_url(base)?;
        info!(target_url = %target, "Calling external API");
        info!(
            message_chars = message.chars().count(),
            "User message is not forwarded; sending fixed payload"
        );

        let payload = outbound_payload();
        #[cfg(feature = "debug-logs")]
        info!("External API payload: {}", payload);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http
            .post(target)
            .headers(headers)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let err = RelayError::from(e);
                error!(category = err.category(), "External API request failed: {}", err);
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| UNREADABLE_BODY.to_string());
            error!(status = status.as_u16(), body = %body, "External API returned an error status");
            if status == StatusCode::UNPROCESSABLE_ENTITY {
                warn!("External API rejected the request as unprocessable (HTTP 422); check the request payload");
            }
            return Err(RelayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            let err = RelayError::from(e);
            error!(category = err.category(), "Failed to read external API response: {}", err);
            err
        })?;
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| RelayError::ResponseDecode(format!("response body is not UTF-8: {e}")))?;

        #[cfg(feature = "debug-logs")]
        info!("Response from external API: {}", text);
        #[cfg(not(feature = "debug-logs"))]
        info!("Response from external API: {}...", preview(&text, LOG_PREVIEW_CHARS));

        serde_json::from_str::<Value>(&text).map_err(|e| {
            warn!("External API response could not be parsed as JSON");
            RelayError::from(e)
        })
    }
}

/// Joins the configured base URL and [`GENERATE_PATH`], dropping trailing slashes from the base.
pub fn build_target_url(base: &str) -> Result<Url, RelayError> {
    let joined = format!("{}{GENERATE_PATH}", base.trim_end_matches('/'));
    Url::parse(&joined).map_err(|e| {
        RelayError::ConfigurationMissing(format!("{ENDPOINT_VAR} is not a valid URL ({e}): {base}"))
    })
}

#[must_use]
pub fn outbound_payload() -> Value {
    json!({ "message": OUTBOUND_MESSAGE })
}

#[cfg_attr(feature = "debug-logs", allow(dead_code))]
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_target_url_strips_trailing_slashes() {
        let url = build_target_url("https://abc.ngrok.app//").unwrap();
        assert_eq!(url.as_str(), "https://abc.ngrok.app/generate");
    }

    #[test]
    fn test_build_target_url_keeps_base_path() {
        let url = build_target_url("https://abc.ngrok.app/api/").unwrap();
        assert_eq!(url.as_str(), "https://abc.ngrok.app/api/generate");
    }

    #[test]
    fn test_build_target_url_rejects_garbage() {
        let err = build_target_url("not a url").unwrap_err();
        assert_eq!(err.category(), "configuration_missing");
    }

    #[test]
    fn test_outbound_payload_is_fixed() {
        assert_eq!(
            serde_json::to_string(&outbound_payload()).unwrap(),
            r#"{"message":"From Lambda"}"#
        );
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("short", 300), "short");
    }
}
