//! Chat relay - an AWS Lambda function that forwards chat messages to an
//! external generation API and echoes back the extended conversation.
//!
//! # Architecture
//!
//! - `api` parses the API Gateway proxy event and shapes every response,
//!   including the fixed CORS headers
//! - `clients` holds the HTTP client for the external `/generate` endpoint
//! - `core` carries configuration and the data model
//! - `errors` defines the failure taxonomy; every variant renders as a 500
//!
//! # Example
//!
//! ```no_run
//! use chat_relay::api::handler::process_event;
//! use chat_relay::clients::GenerateClient;
//! use chat_relay::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     chat_relay::setup_logging();
//!
//!     let client = GenerateClient::from_env()?;
//!     let config = AppConfig::from_source(|name| match name {
//!         "NGROK_ENDPOINT" => Some("https://example.ngrok.app".to_string()),
//!         _ => None,
//!     });
//!
//!     let event = serde_json::json!({ "body": "{\"message\":\"hi\"}" });
//!     let response = process_event(&event, &config, &client).await;
//!     println!("{}", response["body"]);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod clients;
pub mod core;
pub mod errors;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to `CloudWatch` Logs as one JSON object per line. The level is
/// taken from `RUST_LOG`, defaulting to `info`. Calling this more than once is
/// harmless; only the first call installs the subscriber.
///
/// # Example
///
/// ```
/// chat_relay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
