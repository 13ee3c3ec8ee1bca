pub mod message_id;
pub mod provider;
pub mod providers;
pub mod types;

pub use message_id::new_message_id;
pub use provider::{CompletionProvider, CompletionRequest, FALLBACK_REPLY, ProviderError};
pub use providers::{OpenAiProvider, build_provider};
pub use types::{Message, Role, Transcript, WELCOME_MESSAGE};
