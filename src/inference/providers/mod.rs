mod openai;

use std::sync::Arc;

use crate::inference::{CompletionProvider, ProviderError};

pub use openai::{DEFAULT_OPENAI_BASE_URL, OpenAiProvider};

/// Builds the shared completion client. Fails without touching the network
/// when no API key is configured.
pub fn build_provider(
    api_key: Option<String>,
    base_url: String,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    let provider = OpenAiProvider::try_new(api_key, Some(base_url))?;
    Ok(Arc::new(provider))
}
