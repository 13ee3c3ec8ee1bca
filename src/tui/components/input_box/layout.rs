//! Text wrapping and cursor placement for the input box.
//!
//! Rows come from `textwrap` with word breaking enabled, measured in display
//! cells. The cursor is mapped onto the same rows, so the rendered text and
//! the cursor never disagree.

use textwrap::core::display_width;

/// Borders (2) + padding (2) consumed horizontally by the bordered block.
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically.
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in.
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from the area edge to the first content cell (border + padding).
pub(super) const CONTENT_OFFSET_X: u16 = 2;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// Inner text width for an area `area_width` wide. 0 if too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Build textwrap options configured for the input box inner width.
pub(super) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(width.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Byte ranges of `line` (no newlines) shown on each wrapped row. Whitespace
/// trimmed at a wrap point falls between two ranges.
fn row_spans(line: &str, width: u16) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for segment in textwrap::wrap(line, wrap_options(width)) {
        let start = line[offset..]
            .find(segment.as_ref())
            .map(|i| offset + i)
            .unwrap_or(offset);
        let end = start + segment.len();
        spans.push((start, end));
        offset = end;
    }
    if spans.is_empty() {
        spans.push((0, 0));
    }
    spans
}

/// Wrapped rows of the buffer plus the cursor's (row, column) in cells.
#[derive(Debug, PartialEq)]
pub(super) struct TextLayout {
    pub rows: Vec<String>,
    pub cursor_row: u16,
    pub cursor_col: u16,
}

impl TextLayout {
    /// Lays out `text` at `width` cells with the cursor at byte offset `cursor`.
    pub fn new(text: &str, cursor: usize, width: u16) -> Self {
        let width = width.max(1);
        let mut rows = Vec::new();
        let (mut cursor_row, mut cursor_col) = (0u16, 0u16);
        let mut base = 0;

        for line in text.split('\n') {
            let spans = row_spans(line, width);
            if (base..=base + line.len()).contains(&cursor) {
                let local = cursor - base;
                let index = spans
                    .iter()
                    .rposition(|&(start, _)| start <= local)
                    .unwrap_or(0);
                let col = display_width(&line[spans[index].0..local]) as u16;
                cursor_row = (rows.len() + index) as u16;
                cursor_col = col;
                // A full row leaves no cell for the cursor; it moves down.
                if col >= width {
                    cursor_row += 1;
                    cursor_col = 0;
                }
            }
            rows.extend(spans.iter().map(|&(start, end)| line[start..end].to_string()));
            base += line.len() + 1;
        }

        Self {
            rows,
            cursor_row,
            cursor_col,
        }
    }

    /// Rows needed to show the text and the cursor.
    pub fn line_count(&self) -> u16 {
        (self.rows.len() as u16).max(self.cursor_row + 1)
    }
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_end(text: &str, width: u16) -> TextLayout {
        TextLayout::new(text, text.len(), width)
    }

    #[test]
    fn long_words_break_at_width() {
        let layout = at_end("abcdefg", 3);
        assert_eq!(layout.rows, vec!["abc", "def", "g"]);
        assert_eq!((layout.cursor_row, layout.cursor_col), (2, 1));
    }

    #[test]
    fn words_wrap_at_spaces() {
        let layout = at_end("hello world", 8);
        assert_eq!(layout.rows, vec!["hello", "world"]);
        assert_eq!((layout.cursor_row, layout.cursor_col), (1, 5));

        let before_space = TextLayout::new("hello world", 5, 8);
        assert_eq!((before_space.cursor_row, before_space.cursor_col), (0, 5));
        let after_space = TextLayout::new("hello world", 6, 8);
        assert_eq!((after_space.cursor_row, after_space.cursor_col), (1, 0));
    }

    #[test]
    fn full_row_moves_cursor_down() {
        let layout = at_end("abc", 3);
        assert_eq!(layout.rows, vec!["abc"]);
        assert_eq!((layout.cursor_row, layout.cursor_col), (1, 0));
        assert_eq!(layout.line_count(), 2);

        let at_start = TextLayout::new("abc", 0, 3);
        assert_eq!(at_start.line_count(), 1);
    }

    #[test]
    fn newlines_keep_blank_rows() {
        let layout = at_end("a\n\nb", 10);
        assert_eq!(layout.rows, vec!["a", "", "b"]);
        assert_eq!((layout.cursor_row, layout.cursor_col), (2, 1));

        let trailing = at_end("ab\n", 10);
        assert_eq!(trailing.rows, vec!["ab", ""]);
        assert_eq!((trailing.cursor_row, trailing.cursor_col), (1, 0));

        assert_eq!(at_end("", 10).line_count(), 1);
    }

    #[test]
    fn wide_chars_wrap_by_display_width() {
        let layout = at_end("🔥🔥🔥", 4);
        assert_eq!(layout.rows, vec!["🔥🔥", "🔥"]);
        assert_eq!((layout.cursor_row, layout.cursor_col), (1, 2));

        let cjk = at_end("漢字漢字", 4);
        assert_eq!(cjk.rows, vec!["漢字", "漢字"]);
        assert_eq!((cjk.cursor_row, cjk.cursor_col), (2, 0));
    }

    #[test]
    fn rows_never_exceed_width() {
        for text in ["🔥🔥🔥🔥🔥", "a🔥b🔥c🔥", "漢字 and words mixed 漢字漢字"] {
            for width in [2, 3, 4, 7] {
                for row in at_end(text, width).rows {
                    assert!(
                        display_width(&row) <= usize::from(width),
                        "row {row:?} wider than {width}"
                    );
                }
            }
        }
    }

    #[test]
    fn cursor_counts_cells_not_bytes() {
        let text = "café";
        let layout = at_end(text, 10);
        assert_eq!((layout.cursor_row, layout.cursor_col), (0, 4));
    }

    #[test]
    fn boundaries_respect_multibyte_chars() {
        let s = "a🔥b";
        assert_eq!(next_boundary(s, 0), 1);
        assert_eq!(next_boundary(s, 1), 5);
        assert_eq!(next_boundary(s, 6), 6);
        assert_eq!(prev_boundary(s, 5), 1);
        assert_eq!(prev_boundary(s, 1), 0);
        assert_eq!(prev_boundary(s, 0), 0);
    }
}
