//! # Actions
//!
//! Everything that can happen in Parley becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! API responds? That's `Action::ReplyReceived(text)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` telling the caller what I/O to do next.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::notice::{ErrorKind, Notice};
use crate::core::state::App;
use crate::inference::{FALLBACK_REPLY, Message, ProviderError};

#[derive(Debug)]
pub enum Action {
    /// User submitted text from the input box.
    Submit(String),
    /// The completion request resolved with reply text.
    ReplyReceived(String),
    /// The completion request failed.
    RequestFailed(ProviderError),
    /// Clear the current notice (expired or dismissed).
    DismissNotice,
    Quit,
}

/// Side effect the caller must perform after `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send the current transcript to the completion client.
    SpawnRequest,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => submit(app, &text),
        Action::ReplyReceived(text) => {
            if !app.awaiting_reply {
                warn!("Dropping reply that arrived with no request in flight");
                return Effect::None;
            }
            let content = if text.trim().is_empty() {
                FALLBACK_REPLY.to_string()
            } else {
                text
            };
            app.transcript.push(Message::assistant(content));
            app.awaiting_reply = false;
            app.status_message = String::from("Ready");
            info!("Reply appended; transcript length {}", app.transcript.len());
            Effect::None
        }
        Action::RequestFailed(err) => {
            app.awaiting_reply = false;
            warn!("Request failed ({:?}): {}", ErrorKind::classify(&err), err);
            app.notice = Some(Notice::from_error(&err));
            app.status_message = String::from("Send failed");
            Effect::None
        }
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: &str) -> Effect {
    let content = text.trim();
    if content.is_empty() {
        return Effect::None;
    }
    if app.awaiting_reply {
        debug!("Ignoring submit while a reply is pending");
        return Effect::None;
    }
    // Check the key before touching the transcript.
    if !app.is_configured() {
        info!("Submit rejected: no API key configured");
        app.notice = Some(Notice::from_kind(ErrorKind::ConfigurationMissing));
        return Effect::None;
    }

    app.transcript.push(Message::user(content));
    app.awaiting_reply = true;
    app.notice = None;
    app.status_message = String::from("Sending...");
    info!("User message appended; transcript length {}", app.transcript.len());
    Effect::SpawnRequest
}
