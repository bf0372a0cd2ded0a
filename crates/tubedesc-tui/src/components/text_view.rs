//! Wrapping and cursor rendering shared by the form and preview panes.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme::Theme;

/// One screen row of a wrapped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    pub text: String,
    /// Byte column of the cursor if it sits on this row.
    pub cursor_col: Option<usize>,
}

/// Wrap `text` to `width` columns, placing the cursor (a byte offset into
/// `text`) on the row that holds it. Returns the rows and the index of the
/// cursor row (the last row when there is no cursor).
pub fn layout_text(text: &str, cursor: Option<usize>, width: usize) -> (Vec<VisualLine>, usize) {
    let mut rows = Vec::new();
    let mut cursor_row = None;
    let mut line_start = 0usize;

    for logical in text.split('\n') {
        let line_end = line_start + logical.len();
        let local_cursor = cursor
            .filter(|&c| c >= line_start && c <= line_end)
            .map(|c| c - line_start);

        let segments = wrap_line(logical, width);
        let mut offset = 0usize;
        let last = segments.len() - 1;
        for (i, segment) in segments.into_iter().enumerate() {
            let seg_end = offset + segment.len();
            let cursor_col = local_cursor.and_then(|c| {
                // A cursor on a wrap boundary belongs to the next row.
                let on_row = c >= offset && (c < seg_end || (c == seg_end && i == last));
                on_row.then(|| c - offset)
            });
            if cursor_col.is_some() {
                cursor_row = Some(rows.len());
            }
            rows.push(VisualLine {
                text: segment,
                cursor_col,
            });
            offset = seg_end;
        }
        line_start = line_end + 1;
    }

    let cursor_row = cursor_row.unwrap_or(rows.len().saturating_sub(1));
    (rows, cursor_row)
}

/// Word-wrap a single logical line to fit within `max_width` columns.
/// Breaks at the last space when it is not too early in the row, otherwise
/// hard-breaks. Never splits a multi-byte character.
pub fn wrap_line(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || text.chars().count() <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        // Byte offset just past the first `max_width` characters.
        let Some((hard_break, _)) = remaining.char_indices().nth(max_width) else {
            lines.push(remaining.to_string());
            break;
        };

        let break_pos = match remaining[..hard_break].rfind(' ') {
            Some(pos) if remaining[..pos].chars().count() > max_width / 3 => pos + 1,
            _ => hard_break,
        };

        let (line, rest) = remaining.split_at(break_pos);
        lines.push(line.to_string());
        remaining = rest;
    }

    lines
}

/// Render a row, drawing a block cursor at `cursor_col` when present.
pub fn render_row(row: &VisualLine, style: Style) -> Line<'static> {
    let Some(col) = row.cursor_col else {
        return Line::from(Span::styled(row.text.clone(), style));
    };
    let col = col.min(row.text.len());
    let (before, after) = row.text.split_at(col);
    let mut chars = after.chars();
    let (under, rest) = match chars.next() {
        Some(c) => (c.to_string(), chars.as_str()),
        None => (" ".to_string(), ""),
    };
    Line::from(vec![
        Span::styled(before.to_string(), style),
        Span::styled(under, Theme::cursor()),
        Span::styled(rest.to_string(), style),
    ])
}

/// Scroll offset keeping `focus_row` inside a `height`-row viewport, moved
/// as little as possible from `previous`.
pub fn scroll_to_show(previous: usize, focus_row: usize, height: usize) -> usize {
    if height == 0 {
        return previous;
    }
    if focus_row < previous {
        focus_row
    } else if focus_row >= previous + height {
        focus_row + 1 - height
    } else {
        previous
    }
}
