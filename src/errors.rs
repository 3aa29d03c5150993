use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),

    #[error("External API call failed (HTTP {status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to connect to external API: {0}")]
    Connectivity(String),

    #[error("External API returned invalid JSON: {0}")]
    ResponseDecode(String),

    #[error("Failed to parse request body: {0}")]
    BodyParse(String),

    #[error("{0}")]
    Unclassified(String),
}

impl RelayError {
    /// Stable tag for log fields. Never rendered into a response body.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            RelayError::ConfigurationMissing(_) => "configuration_missing",
            RelayError::HttpStatus { .. } => "http_status",
            RelayError::Connectivity(_) => "connectivity",
            RelayError::ResponseDecode(_) => "response_decode",
            RelayError::BodyParse(_) => "body_parse",
            RelayError::Unclassified(_) => "unclassified",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            RelayError::Connectivity(error.to_string())
        } else if error.is_decode() {
            RelayError::ResponseDecode(error.to_string())
        } else {
            RelayError::Unclassified(format!(
                "Unexpected error while calling external API: {error}"
            ))
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(error: serde_json::Error) -> Self {
        RelayError::ResponseDecode(error.to_string())
    }
}
