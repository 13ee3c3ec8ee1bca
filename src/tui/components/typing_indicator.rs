//! # Typing Indicator
//!
//! Three dots in an assistant-styled bubble, shown while a reply is pending.
//! One dot is lit at a time; the lit dot advances with the animation frame.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::inference::Role;
use crate::tui::components::message::role_style;

const DOT: &str = "●";
const DOT_COUNT: usize = 3;

/// Rows taken by the indicator: one line of dots plus borders.
pub const HEIGHT: u16 = 3;
/// Columns taken: `● ● ●` plus padding and borders.
pub const WIDTH: u16 = 11;

#[derive(Clone, Copy)]
pub struct TypingIndicator {
    pub frame_index: usize,
}

impl TypingIndicator {
    pub fn new(frame_index: usize) -> Self {
        Self { frame_index }
    }

    /// Which dot is lit for this frame.
    pub fn active_dot(self) -> usize {
        // Advance every other frame so the dots don't flicker.
        (self.frame_index / 2) % DOT_COUNT
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = Rect::new(area.x, area.y, WIDTH.min(area.width), HEIGHT.min(area.height));
        let border_style = role_style(Role::Assistant).add_modifier(Modifier::DIM);

        let active = self.active_dot();
        let mut spans = Vec::with_capacity(DOT_COUNT * 2);
        for i in 0..DOT_COUNT {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if i == active {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(DOT, style));
        }

        Paragraph::new(Line::from(spans))
            .centered()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            )
            .render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_dot_cycles() {
        let dots: Vec<usize> = (0..12).map(|f| TypingIndicator::new(f).active_dot()).collect();
        assert_eq!(dots, vec![0, 0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_renders_three_dots() {
        let area = Rect::new(0, 0, 20, HEIGHT);
        let mut buf = Buffer::empty(area);
        TypingIndicator::new(0).render(area, &mut buf);

        let row: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert_eq!(row.matches(DOT).count(), 3);
    }
}
