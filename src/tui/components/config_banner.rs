//! # Configuration Banner
//!
//! Persistent warning shown under the title bar while no API key is
//! configured. Sends are refused in that state, so the banner tells the user
//! how to fix it before they try.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::component::Component;

const LABEL: &str = "Configuration Required: ";
const BODY: &str = "Please add your OpenAI API key as OPENAI_API_KEY in your environment \
    (or api_key under [openai] in ~/.parley/config.toml).";
/// Left bar only; the top and bottom borders cost rows, not columns.
const HORIZONTAL_OVERHEAD: u16 = 1;
const VERTICAL_OVERHEAD: u16 = 2;

pub struct ConfigBanner;

impl ConfigBanner {
    /// Rows needed at `width`: wrapped text plus the top and bottom borders.
    pub fn height(width: u16) -> u16 {
        wrapped_rows(width.saturating_sub(HORIZONTAL_OVERHEAD)).len() as u16 + VERTICAL_OVERHEAD
    }
}

/// Byte ranges of `LABEL` + `BODY` shown on each row at `width` cells.
fn wrapped_rows(width: u16) -> Vec<(usize, usize)> {
    let text = format!("{LABEL}{BODY}");
    let options = textwrap::Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);

    let mut rows = Vec::new();
    let mut offset = 0;
    for row in textwrap::wrap(&text, options) {
        let start = text[offset..]
            .find(row.as_ref())
            .map(|i| offset + i)
            .unwrap_or(offset);
        let end = start + row.len();
        rows.push((start, end));
        offset = end;
    }
    rows
}

/// One row, with whatever part of the label it holds in bold.
fn styled_row(text: &str, (start, end): (usize, usize), style: Style) -> Line<'static> {
    let split = LABEL.len().clamp(start, end);
    let mut spans = Vec::new();
    if split > start {
        spans.push(Span::styled(
            text[start..split].to_string(),
            style.add_modifier(Modifier::BOLD),
        ));
    }
    if end > split {
        spans.push(Span::styled(text[split..end].to_string(), style));
    }
    Line::from(spans)
}

impl Component for ConfigBanner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let yellow = Style::default().fg(Color::Yellow);
        let text = format!("{LABEL}{BODY}");
        let lines: Vec<Line> = wrapped_rows(area.width.saturating_sub(HORIZONTAL_OVERHEAD))
            .into_iter()
            .map(|row| styled_row(&text, row, yellow))
            .collect();

        let paragraph = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .border_style(yellow),
        );
        frame.render_widget(paragraph, area);
    }
}
