//! Response builders for the API Gateway proxy integration.
//!
//! Every response carries the same CORS header set, whatever the outcome.

use serde_json::{Map, Value, json};

use crate::core::models::ChatResponseBody;

pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
    ("Access-Control-Allow-Methods", "OPTIONS,POST"),
];

#[must_use]
pub fn cors_headers() -> Value {
    let map: Map<String, Value> = CORS_HEADERS
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
        .collect();
    Value::Object(map)
}

/// Returns a 200 response carrying the reply and the extended history.
#[must_use]
pub fn ok_chat(response: String, conversation_history: Vec<Value>) -> Value {
    build(200, &ChatResponseBody::success(response, conversation_history))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    build(status_code, &ChatResponseBody::failure(message.to_string()))
}

fn build(status_code: u16, body: &ChatResponseBody) -> Value {
    // Serializing a struct of strings and bools cannot fail.
    let body = serde_json::to_string(body).unwrap_or_else(|_| "{\"success\":false}".to_string());
    json!({
        "statusCode": status_code,
        "headers": cors_headers(),
        "body": body
    })
}
