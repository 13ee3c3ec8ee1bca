//! # MessageList Component
//!
//! Scrollable view of the conversation transcript.
//!
//! ## Responsibilities
//!
//! - Display every message as a bubble, oldest first
//! - Show the typing indicator below the last message while a reply is pending
//! - Keep the view pinned to the newest content unless the user scrolled up
//! - Cache bubble heights between frames
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the `Transcript` (props).
//! `Component::render` takes `&mut self`, so the render pass refreshes the
//! layout cache and scroll offset in place.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::inference::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::components::typing_indicator::{self, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Canvas height of the last frame, including the typing indicator
    pub canvas_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            canvas_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.canvas_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// True when the user has scrolled away and content sits below the viewport.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub awaiting_reply: bool,
    pub frame_index: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        awaiting_reply: bool,
        frame_index: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            awaiting_reply,
            frame_index,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let messages = self.transcript.as_slice();

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(MessageBubble::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(messages.len(), content_width);

        let total_height = layout.total_height();
        let indicator_height = if self.awaiting_reply {
            typing_indicator::HEIGHT
        } else {
            0
        };
        let canvas_height = total_height.saturating_add(indicator_height);

        // 2. Clamp scroll offset against the new canvas
        self.state.viewport_height = area.height;
        self.state.canvas_height = canvas_height;
        if self.state.stick_to_bottom {
            let max_y = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: max_y });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageBubble::new(&messages[i]), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.awaiting_reply {
            let rect = Rect::new(0, total_height, content_width, indicator_height);
            scroll_view.render_widget(TypingIndicator::new(self.frame_index), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` because `MessageList` is rebuilt
/// every frame and cannot hold the scroll position.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights. Messages never change after they are appended, so
/// only a width change or a shrinking transcript invalidates the cache.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Indices of messages overlapping the viewport, padded by half a screen
    /// on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn transcript_of(n: usize) -> Transcript {
        let mut transcript = Transcript::new();
        for i in 0..n {
            if i % 2 == 0 {
                transcript.push(Message::user(format!("question {i}")));
            } else {
                transcript.push(Message::assistant(format!("answer {i}")));
            }
        }
        transcript
    }

    fn draw(
        terminal: &mut Terminal<TestBackend>,
        state: &mut MessageListState,
        transcript: &Transcript,
        awaiting: bool,
    ) -> String {
        terminal
            .draw(|f| MessageList::new(state, transcript, awaiting, 0).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 5];
        cache.update_metadata(5, 80);

        assert_eq!(cache.reusable_count(5, 80), 5);
        // New message appended: the old five stay valid
        assert_eq!(cache.reusable_count(6, 80), 5);
        // Width changed
        assert_eq!(cache.reusable_count(5, 40), 0);
        // Transcript shrank
        assert_eq!(cache.reusable_count(3, 80), 0);
    }

    #[test]
    fn test_visible_range() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 10];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.total_height(), 30);

        let range = cache.visible_range(0, 6);
        assert_eq!(range.start, 0);
        assert!(range.end >= 2 && range.end <= 10);

        let range = cache.visible_range(24, 6);
        assert_eq!(range.end, 10);
        assert!(range.start > 0);
    }

    #[test]
    fn test_visible_range_empty_cache() {
        let cache = LayoutCache::new();
        assert_eq!(cache.visible_range(0, 10), 0..0);
        assert_eq!(cache.total_height(), 0);
    }

    #[test]
    fn test_renders_newest_message_when_pinned() {
        let transcript = transcript_of(20);
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();

        let text = draw(&mut terminal, &mut state, &transcript, false);
        assert!(text.contains("answer 19"));
        assert!(!text.contains("question 0"));
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_typing_indicator_extends_canvas() {
        let transcript = transcript_of(2);
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        draw(&mut terminal, &mut state, &transcript, false);
        let idle = state.canvas_height;
        let text = draw(&mut terminal, &mut state, &transcript, true);
        assert_eq!(state.canvas_height, idle + typing_indicator::HEIGHT);
        assert!(text.contains('●'));
    }

    #[test]
    fn test_scroll_up_unpins_and_new_content_stays_unseen() {
        let mut transcript = transcript_of(20);
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        draw(&mut terminal, &mut state, &transcript, false);

        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);
        let offset = state.scroll_state.offset().y;

        transcript.push(Message::user("late arrival"));
        let text = draw(&mut terminal, &mut state, &transcript, false);
        assert_eq!(state.scroll_state.offset().y, offset, "view does not jump");
        assert!(!text.contains("late arrival"));
        assert!(state.has_unseen_content());
    }

    #[test]
    fn test_scroll_to_bottom_repins() {
        let mut transcript = transcript_of(20);
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        draw(&mut terminal, &mut state, &transcript, false);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);

        transcript.push(Message::assistant("fresh reply"));
        let text = draw(&mut terminal, &mut state, &transcript, false);
        assert!(text.contains("fresh reply"));
    }

    #[test]
    fn test_scroll_down_past_end_repins() {
        let transcript = transcript_of(20);
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        draw(&mut terminal, &mut state, &transcript, false);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_short_transcript_has_nothing_unseen() {
        let transcript = transcript_of(1);
        let mut state = MessageListState::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        draw(&mut terminal, &mut state, &transcript, false);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.has_unseen_content());
    }
}
