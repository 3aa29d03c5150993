use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<ConversationMessage> for Value {
    fn from(msg: ConversationMessage) -> Self {
        json!({ "role": msg.role.as_str(), "content": msg.content })
    }
}

/// Body of an inbound chat request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRequest {
    pub message: String,
    /// Prior turns exactly as the caller sent them; echoed back untouched.
    #[serde(default)]
    pub conversation_history: Vec<Value>,
}

/// String-valued claims attached by the upstream authorizer. Logged, never forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityClaims(pub HashMap<String, String>);

impl IdentityClaims {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Email, then Cognito username.
    #[must_use]
    pub fn display_user(&self) -> Option<&str> {
        self.get("email").or_else(|| self.get("cognito:username"))
    }
}

/// JSON body returned to the caller for both outcomes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponseBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponseBody {
    #[must_use]
    pub fn success(response: String, conversation_history: Vec<Value>) -> Self {
        Self {
            success: true,
            response: Some(response),
            conversation_history: Some(conversation_history),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            response: None,
            conversation_history: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incoming_request_defaults_history() {
        let req: IncomingRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.conversation_history.is_empty());
    }

    #[test]
    fn test_incoming_request_keeps_history_entries_verbatim() {
        let req: IncomingRequest = serde_json::from_str(
            r#"{"message":"hi","conversationHistory":[{"role":"system","content":"x","id":7}]}"#,
        )
        .unwrap();
        assert_eq!(
            req.conversation_history,
            vec![json!({"role": "system", "content": "x", "id": 7})]
        );
    }

    #[test]
    fn test_incoming_request_rejects_non_array_history() {
        let res = serde_json::from_str::<IncomingRequest>(
            r#"{"message":"hi","conversationHistory":"nope"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_message_into_value() {
        let v: Value = ConversationMessage::assistant("hello").into();
        assert_eq!(v, json!({"role": "assistant", "content": "hello"}));
    }

    #[test]
    fn test_failure_body_omits_success_fields() {
        let json = serde_json::to_value(ChatResponseBody::failure("boom".into())).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_display_user_prefers_email() {
        let mut claims = HashMap::new();
        claims.insert("cognito:username".to_string(), "alice".to_string());
        let claims = IdentityClaims(claims);
        assert_eq!(claims.display_user(), Some("alice"));

        let mut with_email = claims.0.clone();
        with_email.insert("email".to_string(), "alice@example.com".to_string());
        assert_eq!(
            IdentityClaims(with_email).display_user(),
            Some("alice@example.com")
        );
    }
}
