//! Line wrapping and pagination for monospaced text
//!
//! Every glyph has the same advance, so layout works in character cells:
//! a row holds at most [`PageStyle::columns`] cells and a page holds at most
//! [`PageStyle::rows_per_page`] rows. Lines longer than a row wrap with a
//! hanging indent that keeps continuation text clear of the line numbers.

use super::style::{PageStyle, MAX_TAB_WIDTH};
use crate::render::FormattedLine;
use crate::theme::Color;

/// Consecutive characters drawn in one color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub color: Color,
    pub text: String,
}

/// One visual row of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub runs: Vec<Run>,
}

impl Row {
    /// Append `ch`, extending the last run when the color matches
    fn push(&mut self, color: Color, ch: char) {
        match self.runs.last_mut() {
            Some(run) if run.color == color => run.text.push(ch),
            _ => self.runs.push(Run {
                color,
                text: ch.to_string(),
            }),
        }
    }

    fn push_str(&mut self, color: Color, text: &str) {
        for ch in text.chars() {
            self.push(color, ch);
        }
    }

    /// Row text without colors
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Rows placed on one page, top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub rows: Vec<Row>,
}

/// Expand a line's segments into colored display cells.
///
/// Trailing line terminators are dropped, tabs expand to the next tab stop
/// (measured from the start of the code) and other control characters
/// become spaces.
fn display_cells(line: &FormattedLine, tab_width: usize) -> Vec<(Color, char)> {
    let mut cells = Vec::new();

    for segment in &line.segments {
        for ch in segment.display_text().chars() {
            match ch {
                '\t' => {
                    let spaces = tab_width - (cells.len() % tab_width);
                    cells.extend(std::iter::repeat((segment.color, ' ')).take(spaces));
                }
                c => cells.push((segment.color, c)),
            }
        }
    }

    while matches!(cells.last(), Some((_, '\n' | '\r'))) {
        cells.pop();
    }
    for cell in cells.iter_mut() {
        if cell.1.is_control() {
            cell.1 = ' ';
        }
    }

    cells
}

/// Wrap one formatted line into rows
pub fn wrap_line(line: &FormattedLine, style: &PageStyle) -> Vec<Row> {
    let gutter = line.gutter.display_text();
    let gutter_width = gutter.chars().count();
    let body_width = style.columns().saturating_sub(gutter_width).max(1);
    let cells = display_cells(line, style.tab_width.clamp(1, MAX_TAB_WIDTH));

    let mut first = Row::default();
    first.push_str(line.gutter.color, &gutter);
    if cells.is_empty() {
        return vec![first];
    }

    let indent = " ".repeat(gutter_width);
    let mut rows = Vec::with_capacity(cells.len() / body_width + 1);
    for (index, chunk) in cells.chunks(body_width).enumerate() {
        let mut row = if index == 0 {
            std::mem::take(&mut first)
        } else {
            let mut row = Row::default();
            row.push_str(line.gutter.color, &indent);
            row
        };
        for (color, ch) in chunk {
            row.push(*color, *ch);
        }
        rows.push(row);
    }
    rows
}

/// Lay out lines in order and split the rows into pages.
///
/// An empty input yields no pages.
pub fn paginate(lines: &[FormattedLine], style: &PageStyle) -> Vec<Page> {
    let rows: Vec<Row> = lines.iter().flat_map(|line| wrap_line(line, style)).collect();

    rows.chunks(style.rows_per_page())
        .map(|chunk| Page {
            rows: chunk.to_vec(),
        })
        .collect()
}
