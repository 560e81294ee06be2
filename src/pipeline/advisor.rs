use std::sync::Arc;

use super::openai::{ChatMessage, CompletionProvider, CompletionRequest};

/// Spoken when the call opens and the caller has not said anything yet.
pub const GREETING: &str = "Hi there! Thanks for calling. I'm your business advisor, \
here to help you think through your business challenges. What's on your mind today?";

/// Spoken when the model answers without any text.
pub const NO_CONTENT_FALLBACK: &str =
    "I'm not sure I caught all of that. Could you tell me a bit more?";

/// Spoken when the completion call fails for any reason.
pub const APOLOGY: &str =
    "I'm sorry, I'm having a little trouble right now. Could you please repeat that?";

const MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 150;

const SYSTEM_PROMPT: &str = "You are a friendly, experienced business advisor speaking with a caller on the phone. \
Keep every reply to 2-3 short sentences, since it will be spoken aloud. \
Ask only one question at a time and wait for the answer before moving on. \
Help the caller with topics such as business strategy, marketing and customer growth, \
pricing, cash flow and finances, hiring and team building, and operations. \
Be warm, practical and specific.";

/// What the advisor decided to say, before it is flattened to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Greeting,
    Generated(String),
    NoContent,
    Failed,
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Greeting => GREETING,
            Reply::Generated(text) => text.as_str(),
            Reply::NoContent => NO_CONTENT_FALLBACK,
            Reply::Failed => APOLOGY,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Reply::Generated(text) => text,
            other => other.text().to_string(),
        }
    }
}

/// Produces the next line for the caller from their latest utterance.
///
/// Only the single latest utterance is sent; there is no call history.
pub struct Advisor {
    provider: Arc<dyn CompletionProvider>,
}

impl Advisor {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub async fn respond(&self, utterance: &str) -> Reply {
        if utterance.is_empty() {
            return Reply::Greeting;
        }

        match self.provider.complete(&build_request(utterance)).await {
            Ok(Some(text)) => Reply::Generated(text),
            Ok(None) => {
                tracing::warn!("Completion returned no content");
                Reply::NoContent
            }
            Err(e) => {
                tracing::error!("Completion failed: {e}");
                Reply::Failed
            }
        }
    }
}

fn build_request(utterance: &str) -> CompletionRequest {
    CompletionRequest {
        model: MODEL.to_string(),
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(utterance)],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}
