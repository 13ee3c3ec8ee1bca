//! OpenAI provider implementation using the Chat Completions API.
//!
//! One non-streaming `POST /chat/completions` per user turn. The full
//! transcript is sent every time; the endpoint keeps no conversation state.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{
    CompletionProvider, CompletionRequest, FALLBACK_REPLY, Message, ProviderError, Role,
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

// ============================================================================
// Chat Completions API Types
// ============================================================================

/// A single message in the `messages` array. Ids and timestamps stay local.
#[derive(Serialize, Debug, Clone, PartialEq)]
struct ApiMessage<'a> {
    role: Role,
    content: &'a str,
}

/// The request body for the Chat Completions API
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error envelope: `{"error": {"message": "..."}}`
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn transcript_to_messages(messages: &[Message]) -> Vec<ApiMessage<'_>> {
    messages
        .iter()
        .map(|msg| ApiMessage {
            role: msg.role(),
            content: msg.content(),
        })
        .collect()
}

/// First choice's text, or the fallback when there is none.
fn extract_reply(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

/// Pulls the human-readable message out of an error body, if it has one.
fn error_message(body: String) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body,
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// OpenAI (or compatible) chat completions provider.
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `base_url` - Optional custom base URL (defaults to OpenAI's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a provider only if an API key is present.
    pub fn try_new(api_key: Option<String>, base_url: Option<String>) -> Result<Self, ProviderError> {
        match api_key.filter(|key| !key.trim().is_empty()) {
            Some(key) => Ok(Self::new(key, base_url)),
            None => Err(ProviderError::Config(
                "OpenAI API key not found. Set OPENAI_API_KEY or [openai].api_key.".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: request.model,
            messages: transcript_to_messages(request.messages),
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        };

        info!(
            "OpenAI request: model={}, message_count={}, max_tokens={}",
            body.model,
            body.messages.len(),
            body.max_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("OpenAI response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenAI API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: error_message(err_body),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let reply = extract_reply(parsed);
        info!("OpenAI reply received: {} bytes", reply.len());
        Ok(reply)
    }
}
