use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use subtle::ConstantTimeEq;

use super::event::WebhookEvent;
use crate::AppState;

/// Header Vapi uses to carry the server URL secret.
const SECRET_HEADER: &str = "x-vapi-secret";

/// Body cap for the webhook route. End-of-call reports carry the full
/// transcript and artifacts, well past axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WebhookResponse {
    Reply { response: String },
    Ack { received: bool },
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("invalid or missing webhook secret")]
    Unauthorized,
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),
    #[error("malformed JSON payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match self {
            WebhookError::Unauthorized => {
                tracing::warn!("Rejected webhook with bad secret");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Unauthorized",
                    }),
                )
                    .into_response()
            }
            other => {
                tracing::error!("Webhook handling failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error",
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Handle POST /api/vapi/webhook: Vapi server messages.
///
/// Assistant requests get the advisor's next line; every other message is
/// acknowledged with `{"received": true}`.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<WebhookResponse>, WebhookError> {
    check_secret(&headers, state.config.vapi.webhook_secret.as_deref())?;

    let body = body?;
    let payload: serde_json::Value = serde_json::from_slice(&body)?;
    let event = WebhookEvent::from_value(&payload);

    match event {
        WebhookEvent::AssistantRequest { transcript } => {
            tracing::info!(transcript = %transcript, "Assistant request");

            let reply = state.advisor.respond(&transcript).await;
            let response = reply.into_text();

            tracing::info!(response_len = response.len(), %response, "Replying");
            Ok(Json(WebhookResponse::Reply { response }))
        }
        WebhookEvent::Other { kind } => {
            tracing::debug!(kind = kind.as_deref().unwrap_or("<none>"), "Acknowledging event");
            Ok(Json(WebhookResponse::Ack { received: true }))
        }
    }
}

fn check_secret(headers: &HeaderMap, expected: Option<&str>) -> Result<(), WebhookError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());

    match provided {
        Some(secret) if bool::from(secret.as_bytes().ct_eq(expected.as_bytes())) => Ok(()),
        _ => Err(WebhookError::Unauthorized),
    }
}
