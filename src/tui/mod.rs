//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Awaiting a reply**: draws every ~80ms so the typing indicator animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, replies
//!   from the background task, or when a notice expires.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! `set_cursor_position` resets the terminal's blink timer on every draw.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::conversation::request_reply;
use crate::core::state::App;
use crate::inference::CompletionRequest;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How long a notice stays on screen unless dismissed with Esc.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals without support ignore it.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// True once the current notice has been on screen for `NOTICE_TTL`.
fn notice_expired(app: &App) -> bool {
    app.notice
        .as_ref()
        .is_some_and(|notice| notice.raised_at.elapsed() >= NOTICE_TTL)
}

/// Routes one terminal event. Returns true when the app should quit.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, tx: &mpsc::Sender<Action>) -> bool {
    match event {
        TuiEvent::Quit => update(app, Action::Quit) == Effect::Quit,
        TuiEvent::Resize => false,
        TuiEvent::Escape => {
            if app.notice.is_some() {
                update(app, Action::DismissNotice);
            }
            false
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            false
        }
        _ => {
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                // A fresh message always brings the view back to the bottom.
                tui.message_list.handle_event(&TuiEvent::ScrollToBottom);
                if update(app, Action::Submit(text)) == Effect::SpawnRequest {
                    spawn_request(app, tx.clone());
                }
            }
            false
        }
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut frame_index: usize = 0;
    let mut needs_redraw = true;

    loop {
        // Sync InputBox props with App state
        tui.input_box.disabled = app.awaiting_reply;

        if notice_expired(&app) {
            debug!("Notice expired");
            update(&mut app, Action::DismissNotice);
            needs_redraw = true;
        }

        let animating = app.awaiting_reply;
        if animating {
            needs_redraw = true;
            frame_index = frame_index.wrapping_add(1);
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, frame_index))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout)?;

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        let mut pending = first_event;
        while let Some(event) = pending {
            if handle_event(&mut app, &mut tui, event, &tx) {
                should_quit = true;
                break;
            }
            tui.input_box.disabled = app.awaiting_reply;
            pending = poll_event_immediate()?;
        }

        if should_quit {
            break;
        }

        // Replies from the background task
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::SpawnRequest {
                spawn_request(&app, tx.clone());
            }
        }
    }

    info!("Exiting ({} messages in transcript)", app.transcript.len());
    ratatui::restore();
    Ok(())
}

/// Sends the current transcript on a background task; the outcome comes back
/// as an `Action` on `tx`.
fn spawn_request(app: &App, tx: mpsc::Sender<Action>) {
    let Some(client) = app.client.clone() else {
        warn!("spawn_request called without a configured client");
        return;
    };
    info!("Spawning completion request");

    let messages = app.transcript.as_slice().to_vec();
    let settings = app.settings.clone();

    tokio::spawn(async move {
        let request = CompletionRequest {
            messages: &messages,
            model: &settings.model,
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        };
        let action = request_reply(client, request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    });
}
