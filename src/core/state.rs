//! # Application State
//!
//! Core business state for Parley. Domain logic only; presentation state
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── client: Option<Arc<dyn CompletionProvider>>  // None = no API key
//! ├── settings: CompletionSettings   // model, token cap, temperature
//! ├── transcript: Transcript         // append-only conversation
//! ├── awaiting_reply: bool           // one request in flight
//! ├── notice: Option<Notice>         // current toast
//! └── status_message: String         // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::notice::Notice;
use crate::inference::{CompletionProvider, CompletionRequest, Transcript};

/// Fixed request parameters sent with every completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl CompletionSettings {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            model: config.model_name.clone(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        }
    }
}

pub struct App {
    /// Shared completion client, injected at startup. Never replaced.
    pub client: Option<Arc<dyn CompletionProvider>>,
    pub settings: CompletionSettings,
    pub transcript: Transcript,
    /// True exactly while one completion request is in flight.
    pub awaiting_reply: bool,
    pub notice: Option<Notice>,
    pub status_message: String,
}

impl App {
    /// Creates the session state with the welcome message already seeded.
    pub fn new(
        client: Option<Arc<dyn CompletionProvider>>,
        settings: CompletionSettings,
        welcome_message: &str,
    ) -> Self {
        let mut transcript = Transcript::new();
        transcript.seed_welcome(welcome_message);
        let status_message = if client.is_some() {
            String::from("Ready")
        } else {
            String::from("API key missing")
        };
        Self {
            client,
            settings,
            transcript,
            awaiting_reply: false,
            notice: None,
            status_message,
        }
    }

    pub fn from_config(client: Option<Arc<dyn CompletionProvider>>, config: &ResolvedConfig) -> Self {
        Self::new(
            client,
            CompletionSettings::from_config(config),
            &config.welcome_message,
        )
    }

    /// Whether a completion client is configured.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// The request describing the current transcript.
    pub fn completion_request(&self) -> CompletionRequest<'_> {
        CompletionRequest {
            messages: self.transcript.as_slice(),
            model: &self.settings.model,
            max_output_tokens: self.settings.max_output_tokens,
            temperature: self.settings.temperature,
        }
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: crate::core::config::DEFAULT_MODEL.to_string(),
            max_output_tokens: crate::core::config::DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: crate::core::config::DEFAULT_TEMPERATURE,
        }
    }
}
