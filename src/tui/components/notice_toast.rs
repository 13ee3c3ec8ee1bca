//! # Notice Toast
//!
//! Renders the current `Notice` as an overlay in the top-right corner of
//! the conversation area. Expiry and dismissal are handled by the event loop;
//! this component only draws.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::notice::Notice;
use crate::tui::component::Component;

const MAX_WIDTH: u16 = 48;

pub struct NoticeToast<'a> {
    pub notice: &'a Notice,
}

impl<'a> NoticeToast<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }

    /// Where the toast lands inside `area`: top-right, sized to its text.
    pub fn placement(&self, area: Rect) -> Rect {
        let width = MAX_WIDTH.min(area.width);
        let inner = width.saturating_sub(2).max(1) as usize;
        let lines = textwrap::wrap(&self.notice.description, inner).len() as u16;
        let height = (lines.max(1) + 2).min(area.height);
        Rect::new(area.x + area.width - width, area.y, width, height)
    }
}

impl<'a> Component for NoticeToast<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = self.placement(area);
        let style = Style::default().fg(Color::Red);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(Line::styled(
                self.notice.title.as_str(),
                style.add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from("Esc").right_aligned());

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(self.notice.description.as_str())
                .wrap(Wrap { trim: true })
                .block(block),
            rect,
        );
    }
}
