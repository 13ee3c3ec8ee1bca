use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::inference::{Message, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
pub const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
pub const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles never grow past this share of the row.
const MAX_WIDTH_PERCENT: u16 = 70;
/// Width of the `HH:MM` stamp in the bottom border.
const TIME_LABEL_WIDTH: usize = 5;

/// A stateless chat bubble: user messages hug the right edge, assistant
/// messages the left. The role sits in the top border, the send time in the
/// bottom border.
///
/// Content is wrapped up front with `textwrap`, so `calculate_height` and
/// the rendered paragraph always agree on the line count.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Outer width of the bubble inside a row `row_width` columns wide.
    pub fn bubble_width(message: &Message, row_width: u16) -> u16 {
        let max_width = (u32::from(row_width) * u32::from(MAX_WIDTH_PERCENT) / 100) as u16;
        let max_width = max_width.max(HORIZONTAL_OVERHEAD + 1);
        let longest_line = message
            .content()
            .trim()
            .lines()
            .map(textwrap::core::display_width)
            .max()
            .unwrap_or(0);
        let header = message.role().label().len() + 1 + TIME_LABEL_WIDTH;
        let wanted = longest_line.max(header) as u16 + HORIZONTAL_OVERHEAD;
        wanted.min(max_width).min(row_width)
    }

    /// Height of the bubble (borders included) inside a row of `row_width`.
    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        let inner = Self::bubble_width(message, row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if inner == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        wrap_content(message.content(), inner).len() as u16 + VERTICAL_OVERHEAD
    }
}

/// Wraps trimmed content to `width`, always yielding at least one line.
fn wrap_content(content: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let lines: Vec<String> = textwrap::wrap(content.trim(), options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::Green),
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let role = self.message.role();
        let width = Self::bubble_width(self.message, area.width);
        let x = match role {
            Role::User => area.x + area.width.saturating_sub(width),
            Role::Assistant => area.x,
        };
        let bubble = Rect::new(x, area.y, width, area.height);

        let style = role_style(role);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::styled(role.label(), style.add_modifier(Modifier::BOLD)))
            .title_bottom(Line::from(self.message.time_label()).right_aligned())
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(bubble);
        block.render(bubble, buf);

        let lines: Vec<Line> = wrap_content(self.message.content(), inner.width)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(Text::from(lines))
            .style(Style::default().fg(Color::White))
            .render(inner, buf);
    }
}
