//! Lambda handler for the chat relay.
//!
//! Parses the proxied HTTP event, forwards to the reply backend, and shapes a
//! JSON response. Every failure is caught here and becomes a 500.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::{helpers, parsing};
use crate::clients::ReplyBackend;
use crate::core::config::AppConfig;
use crate::core::models::ConversationMessage;
use crate::errors::RelayError;

pub use self::function_handler as handler;

/// Used when the external API answers without a `response` field, or with `null`.
pub const DEFAULT_REPLY: &str = "Default response from API";

/// Lambda entry point.
///
/// Configuration is re-read from the environment on every invocation.
///
/// # Errors
///
/// Never returns `Err`; failures are rendered as 500 responses.
#[tracing::instrument(level = "info", skip(backend, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler<B>(backend: &B, event: LambdaEvent<Value>) -> Result<Value, Error>
where
    B: ReplyBackend + ?Sized,
{
    let config = AppConfig::from_env();
    Ok(process_event(&event.payload, &config, backend).await)
}

/// Handles one proxied HTTP event and always produces a response payload.
pub async fn process_event<B>(payload: &Value, config: &AppConfig, backend: &B) -> Value
where
    B: ReplyBackend + ?Sized,
{
    info!("Received event: {}", payload);

    match relay(payload, config, backend).await {
        Ok((reply, history)) => helpers::ok_chat(reply, history),
        Err(e) => {
            error!(category = e.category(), "Error: {}", e);
            helpers::err_response(500, &e.to_string())
        }
    }
}

async fn relay<B>(
    payload: &Value,
    config: &AppConfig,
    backend: &B,
) -> Result<(String, Vec<Value>), RelayError>
where
    B: ReplyBackend + ?Sized,
{
    if let Some(claims) = parsing::extract_identity_claims(payload) {
        info!(
            "Authenticated user: {}",
            claims.display_user().unwrap_or("unknown")
        );
    }

    let body = parsing::extract_body(payload)?;
    let request = parsing::parse_chat_request(&body)?;
    info!("Processing message: {}", request.message);

    let mut messages = request.conversation_history;
    messages.push(ConversationMessage::user(request.message.as_str()).into());

    let external = backend.generate(config, &request.message).await?;
    let reply = reply_text(&external)?;

    messages.push(ConversationMessage::assistant(reply.as_str()).into());
    Ok((reply, messages))
}

/// Pulls the assistant text out of the external API's JSON body.
///
/// Empty values (`null`, `{}`, `[]`, `""`, `0`, `false`) count as no response.
/// A `response` that is absent or `null` falls back to [`DEFAULT_REPLY`]; any
/// other non-string `response` is kept as its JSON text.
pub fn reply_text(external: &Value) -> Result<String, RelayError> {
    if is_empty_reply(external) {
        return Err(RelayError::Unclassified(
            "No response from external API".to_string(),
        ));
    }

    let Some(obj) = external.as_object() else {
        return Err(RelayError::ResponseDecode(format!(
            "expected a JSON object, got {external}"
        )));
    };

    Ok(match obj.get("response") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => DEFAULT_REPLY.to_string(),
        Some(other) => other.to_string(),
    })
}

fn is_empty_reply(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
