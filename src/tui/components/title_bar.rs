//! # TitleBar Component
//!
//! Top status bar: app name, provider, model and the transient status.
//!
//! The title text changes based on state:
//!
//! 1. **Unseen content**: `"Parley · AI Chatbot (powered by OpenAI, gpt-4o) | Ready | ↓ New"`
//! 2. **Status message**: `"Parley · AI Chatbot (powered by OpenAI, gpt-4o) | Ready"`
//! 3. **Default**: `"Parley · AI Chatbot (powered by OpenAI, gpt-4o)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
///
/// # Props
///
/// - `model_name`: The model requests go to
/// - `status_message`: Transient status ("Ready", "Sending...", "Send failed")
/// - `has_unseen_content`: Whether there's content below the current scroll position
pub struct TitleBar {
    pub model_name: String,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(model_name: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            model_name,
            status_message,
            has_unseen_content,
        }
    }

    /// The plain-text suffix after the app name.
    fn detail_text(&self) -> String {
        let base = format!(" (powered by OpenAI, {})", self.model_name);
        match (self.status_message.is_empty(), self.has_unseen_content) {
            (_, true) => format!("{base} | {} | ↓ New", self.status_message),
            (true, false) => base,
            (false, false) => format!("{base} | {}", self.status_message),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                "Parley · AI Chatbot",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.detail_text(), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(line, area);
    }
}
