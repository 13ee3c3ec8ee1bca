//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::{App, CompletionSettings};
use crate::inference::{
    CompletionProvider, CompletionRequest, ProviderError, WELCOME_MESSAGE,
};

/// A provider that answers every request with the same canned outcome and
/// records how long each transcript it received was.
pub struct ScriptedProvider {
    outcome: Result<String, ProviderError>,
    seen: Mutex<Vec<usize>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen_lengths(&self) -> Vec<usize> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        self.seen.lock().unwrap().push(request.messages.len());
        self.outcome.clone()
    }
}

fn test_settings() -> CompletionSettings {
    CompletionSettings {
        model: "test-model".to_string(),
        ..CompletionSettings::default()
    }
}

/// Creates a test App backed by the given provider.
pub fn app_with(provider: Arc<ScriptedProvider>) -> App {
    let client: Arc<dyn CompletionProvider> = provider;
    App::new(Some(client), test_settings(), WELCOME_MESSAGE)
}

/// Creates a test App with a provider that replies "ok".
pub fn test_app() -> App {
    app_with(ScriptedProvider::replying("ok"))
}

/// Creates a test App with no API key configured.
pub fn unconfigured_app() -> App {
    App::new(None, test_settings(), WELCOME_MESSAGE)
}
