//! # InputBox Component
//!
//! Multi-line message composer.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, newline insertion)
//! - Handle editing (backspace, delete, cursor movement)
//! - Handle submission (Enter), emitting the trimmed text
//! - Show a placeholder while empty and refuse input while disabled
//!
//! ## State Management
//!
//! The buffer, cursor and internal scroll offset are internal state. The
//! `disabled` flag is a prop the event loop syncs from `App::awaiting_reply`
//! before every frame.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, TextLayout, VERTICAL_OVERHEAD,
    inner_width, next_boundary, prev_boundary,
};

pub const PLACEHOLDER: &str = "Type your message here...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted non-blank text (Enter pressed). Already trimmed.
    Submit(String),
    /// Buffer or cursor changed
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `disabled`: true while a reply is pending
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Byte offset into `buffer`, always on a char boundary
/// - `scroll_offset`: First visible row once content exceeds `MAX_VISIBLE_LINES`
pub struct InputBox {
    pub buffer: String,
    pub disabled: bool,
    cursor: usize,
    scroll_offset: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Required height for the current buffer at `area_width`, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let layout = TextLayout::new(&self.buffer, self.cursor, inner_width(area_width));
        layout.line_count().clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Keep the cursor row inside the visible window.
    fn update_scroll_offset(&mut self, layout: &TextLayout) {
        let row = layout.cursor_row;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
        let max_offset = layout.line_count().saturating_sub(MAX_VISIBLE_LINES);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect, block: Block) {
        let placeholder = Paragraph::new(Line::styled(
            PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let (title, border_style) = if self.disabled {
            (
                "Waiting for reply...",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            ("Message", Style::default().fg(Color::Cyan))
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .title(title);

        let layout = TextLayout::new(&self.buffer, self.cursor, width);
        if self.buffer.is_empty() {
            self.scroll_offset = 0;
            self.render_placeholder(frame, area, block);
        } else {
            self.update_scroll_offset(&layout);
            let rows = &layout.rows;
            let start = usize::from(self.scroll_offset).min(rows.len());
            let end = (start + usize::from(MAX_VISIBLE_LINES)).min(rows.len());
            let lines: Vec<Line> = rows[start..end]
                .iter()
                .map(|row| Line::raw(row.as_str()))
                .collect();

            let text_style = if self.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            frame.render_widget(Paragraph::new(lines).style(text_style).block(block), area);
        }

        if !self.disabled && width > 0 {
            let x = area.x + CONTENT_OFFSET_X + layout.cursor_col;
            let y = area.y
                + CONTENT_OFFSET_Y
                + layout.cursor_row.saturating_sub(self.scroll_offset);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_str(&normalized);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                let text = self.buffer.trim();
                if text.is_empty() {
                    return None;
                }
                let text = text.to_string();
                self.buffer.clear();
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
