use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::{IdentityClaims, IncomingRequest};
use crate::errors::RelayError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

/// Returns the raw request body, base64-decoding it when the event says so.
pub fn extract_body(payload: &Value) -> Result<String, RelayError> {
    let Some(body) = payload.get("body").filter(|b| !b.is_null()) else {
        return Err(RelayError::BodyParse("request body is missing".to_string()));
    };

    let Some(body_str) = body.as_str() else {
        return Err(RelayError::BodyParse("request body is not a string".to_string()));
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(body_str.to_string());
    }

    let bytes = STANDARD
        .decode(body_str)
        .map_err(|e| RelayError::BodyParse(format!("invalid base64 body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| RelayError::BodyParse(format!("decoded body is not UTF-8: {e}")))
}

pub fn parse_chat_request(body: &str) -> Result<IncomingRequest, RelayError> {
    serde_json::from_str(body).map_err(|e| RelayError::BodyParse(e.to_string()))
}

/// Claims from a Cognito (REST API) or JWT (HTTP API) authorizer, keeping
/// string values only.
pub fn extract_identity_claims(payload: &Value) -> Option<IdentityClaims> {
    let claims = v_path(payload, &["requestContext", "authorizer", "claims"])
        .or_else(|| v_path(payload, &["requestContext", "authorizer", "jwt", "claims"]))?
        .as_object()?;

    Some(IdentityClaims(
        claims
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect(),
    ))
}
