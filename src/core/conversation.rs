//! # Conversation Round Trip
//!
//! The one piece of the core that awaits I/O: handing the transcript to the
//! completion client and turning the outcome back into an `Action`.
//!
//! The TUI runs `request_reply` on a spawned task and feeds the action back
//! through its event loop. `send_message` does the whole turn inline, which
//! is what the one-shot CLI mode and the tests use.

use std::sync::Arc;

use log::info;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::inference::{CompletionProvider, CompletionRequest};

/// Performs a single completion call and maps the outcome to an action.
pub async fn request_reply(
    client: Arc<dyn CompletionProvider>,
    request: CompletionRequest<'_>,
) -> Action {
    info!(
        "Requesting completion from {} ({} messages)",
        client.name(),
        request.messages.len()
    );
    match client.complete(request).await {
        Ok(text) => Action::ReplyReceived(text),
        Err(err) => Action::RequestFailed(err),
    }
}

/// Submits `text` and, if a request is warranted, awaits the reply and
/// applies it. Returns the effect of the final update.
pub async fn send_message(app: &mut App, text: impl Into<String>) -> Effect {
    let effect = update(app, Action::Submit(text.into()));
    if effect != Effect::SpawnRequest {
        return effect;
    }

    // Submit only asks for a request when a client is configured.
    let Some(client) = app.client.clone() else {
        return Effect::None;
    };
    let action = request_reply(client, app.completion_request()).await;
    update(app, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{ProviderError, Role};
    use crate::test_support::{ScriptedProvider, app_with, unconfigured_app};

    #[tokio::test]
    async fn test_successful_round_trip() {
        let provider = ScriptedProvider::replying("Hi! How can I help?");
        let mut app = app_with(provider.clone());

        let effect = send_message(&mut app, "Hello").await;

        assert_eq!(effect, Effect::None);
        assert!(!app.awaiting_reply);
        assert_eq!(app.transcript.len(), 3);
        let roles: Vec<Role> = app.transcript.iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(app.transcript.last().unwrap().content(), "Hi! How can I help?");
    }

    #[tokio::test]
    async fn test_client_sees_full_transcript() {
        let provider = ScriptedProvider::replying("ok");
        let mut app = app_with(provider.clone());

        send_message(&mut app, "first").await;
        send_message(&mut app, "second").await;

        // welcome + first + reply + second
        assert_eq!(provider.seen_lengths(), vec![2, 4]);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_round_trip_keeps_user_message() {
        let provider = ScriptedProvider::failing(ProviderError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        });
        let mut app = app_with(provider);

        send_message(&mut app, "Hello").await;

        assert!(!app.awaiting_reply);
        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript.last().unwrap().role(), Role::User);
        assert_eq!(
            app.notice.as_ref().unwrap().description,
            "Invalid API key. Please check your OpenAI API key configuration."
        );
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_call() {
        let mut app = unconfigured_app();

        let effect = send_message(&mut app, "hi").await;

        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), 1);
        assert_eq!(
            app.notice.as_ref().unwrap().title,
            "Configuration Required"
        );
    }

    #[test]
    fn test_empty_reply_is_fallback_text() {
        let provider = ScriptedProvider::replying("");
        let mut app = app_with(provider);

        tokio_test::block_on(send_message(&mut app, "Hello"));

        assert_eq!(
            app.transcript.last().unwrap().content(),
            "Sorry, I could not generate a response."
        );
    }

    #[test]
    fn test_whitespace_submit_makes_no_call() {
        let provider = ScriptedProvider::replying("unused");
        let mut app = app_with(provider.clone());

        tokio_test::block_on(send_message(&mut app, "   "));

        assert_eq!(provider.calls(), 0);
        assert_eq!(app.transcript.len(), 1);
    }
}
