use serde_json::Value;

/// Message type Vapi sends when it wants the assistant's next line.
pub const ASSISTANT_REQUEST: &str = "assistant-request";

/// An inbound Vapi server message, reduced to what the webhook acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    /// The platform is waiting for something to say. Empty transcript means
    /// the caller has not spoken yet.
    AssistantRequest { transcript: String },
    /// Anything else: status updates, end-of-call reports, or shapes we don't know.
    Other { kind: Option<String> },
}

impl WebhookEvent {
    /// Classify a parsed body. Never fails; unknown shapes become `Other`.
    pub fn from_value(body: &Value) -> Self {
        let message = body.get("message");
        let kind = message
            .and_then(|m| m.get("type"))
            .and_then(Value::as_str);

        match kind {
            Some(ASSISTANT_REQUEST) => {
                let transcript = message
                    .and_then(|m| m.get("transcript"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                WebhookEvent::AssistantRequest { transcript }
            }
            other => WebhookEvent::Other {
                kind: other.map(String::from),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assistant_request_with_transcript() {
        let event = WebhookEvent::from_value(&json!({
            "message": { "type": "assistant-request", "transcript": "I need help with marketing" }
        }));
        assert_eq!(
            event,
            WebhookEvent::AssistantRequest {
                transcript: "I need help with marketing".into()
            }
        );
    }

    #[test]
    fn missing_or_null_transcript_is_empty() {
        for body in [
            json!({ "message": { "type": "assistant-request" } }),
            json!({ "message": { "type": "assistant-request", "transcript": null } }),
            json!({ "message": { "type": "assistant-request", "transcript": 42 } }),
        ] {
            assert_eq!(
                WebhookEvent::from_value(&body),
                WebhookEvent::AssistantRequest {
                    transcript: String::new()
                }
            );
        }
    }

    #[test]
    fn other_types_keep_their_kind() {
        let event = WebhookEvent::from_value(&json!({
            "message": { "type": "status-update", "status": "in-progress" }
        }));
        assert_eq!(
            event,
            WebhookEvent::Other {
                kind: Some("status-update".into())
            }
        );
    }

    #[test]
    fn unknown_shapes_are_other_without_kind() {
        for body in [
            json!({}),
            json!({ "message": "hello" }),
            json!({ "message": { "type": 7 } }),
            json!([1, 2, 3]),
            json!(null),
        ] {
            assert_eq!(
                WebhookEvent::from_value(&body),
                WebhookEvent::Other { kind: None }
            );
        }
    }
}
