use std::env;
use std::time::Duration;

use crate::errors::RelayError;

pub const MODEL_ID_VAR: &str = "MODEL_ID";
pub const ENDPOINT_VAR: &str = "NGROK_ENDPOINT";
pub const TIMEOUT_VAR: &str = "EXTERNAL_API_TIMEOUT_SECS";

pub const DEFAULT_MODEL_ID: &str = "us.amazon.nova-lite-v1:0";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Carried for deployment parity; the relay does not use it on the call path.
    pub model_id: String,
    pub external_api_base: Option<String>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// Called once per invocation, so changes to the environment between
    /// invocations take effect without a restart.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            model_id: lookup(MODEL_ID_VAR).unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            external_api_base: lookup(ENDPOINT_VAR)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    /// Returns the configured base URL, or a configuration error when it is
    /// unset or blank.
    pub fn require_endpoint(&self) -> Result<&str, RelayError> {
        self.external_api_base.as_deref().ok_or_else(|| {
            RelayError::ConfigurationMissing(format!(
                "{ENDPOINT_VAR} is not set in the function environment"
            ))
        })
    }
}

/// Per-request timeout for the outbound call, read once when the HTTP client
/// is built. `None` leaves the platform's invocation timeout as the only limit.
#[must_use]
pub fn request_timeout_from_env() -> Option<Duration> {
    request_timeout_from_source(|name| env::var(name).ok())
}

pub fn request_timeout_from_source<F>(lookup: F) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(TIMEOUT_VAR)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
