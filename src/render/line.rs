//! Per-line formatting: gutter label plus colorized, escaped segments

use super::markup::{escape_markup, font_span, unescape_markup};
use crate::syntax::LexicalToken;
use crate::theme::{Color, ColorTable, Theme};

/// Minimum width of the right-aligned line number
pub const GUTTER_DIGITS: usize = 4;

/// Spaces between the line number and the code
pub const GUTTER_PADDING: usize = 2;

/// A colored piece of a formatted line. `text` is markup-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub color: Color,
    pub text: String,
}

impl Segment {
    /// Escape `raw` and pair it with `color`
    pub fn from_raw(color: Color, raw: &str) -> Self {
        Self {
            color,
            text: escape_markup(raw),
        }
    }

    /// The characters this segment displays
    pub fn display_text(&self) -> String {
        unescape_markup(&self.text)
    }

    pub fn to_markup(&self) -> String {
        font_span(self.color, &self.text)
    }
}

/// One source line ready for layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    /// 1-based physical line number
    pub line_number: usize,
    pub gutter: Segment,
    /// Code segments in source order
    pub segments: Vec<Segment>,
}

impl FormattedLine {
    /// Inline markup for the whole line, gutter first
    pub fn to_markup(&self) -> String {
        let mut markup = self.gutter.to_markup();
        for segment in &self.segments {
            markup.push_str(&segment.to_markup());
        }
        markup
    }

    /// The displayed code text, without the gutter
    pub fn display_text(&self) -> String {
        self.segments.iter().map(Segment::display_text).collect()
    }
}

/// Right-aligned line number label, e.g. `"   1  "`
pub fn gutter_label(line_number: usize) -> String {
    format!(
        "{:>width$}{:pad$}",
        line_number,
        "",
        width = GUTTER_DIGITS,
        pad = GUTTER_PADDING
    )
}

/// Format one line of tokens
///
/// Each fragment is escaped once, then paired with the color its category
/// resolves to. Segment order equals token order.
pub fn render_line(
    tokens: &[LexicalToken],
    table: &ColorTable,
    gutter_color: Color,
    line_number: usize,
) -> FormattedLine {
    let segments = tokens
        .iter()
        .filter(|token| !token.text.is_empty())
        .map(|token| Segment::from_raw(table.resolve(token.category), &token.text))
        .collect();

    FormattedLine {
        line_number,
        gutter: Segment::from_raw(gutter_color, &gutter_label(line_number)),
        segments,
    }
}

/// Format every line, numbering from 1
pub fn render_lines(lines: &[Vec<LexicalToken>], theme: &Theme) -> Vec<FormattedLine> {
    lines
        .iter()
        .enumerate()
        .map(|(index, tokens)| render_line(tokens, &theme.syntax, theme.gutter, index + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{tokenize_line, TokenCategory};

    #[test]
    fn test_gutter_label_width() {
        assert_eq!(gutter_label(1), "   1  ");
        assert_eq!(gutter_label(42), "  42  ");
        assert_eq!(gutter_label(9999), "9999  ");
        assert_eq!(gutter_label(12345), "12345  ");
    }

    #[test]
    fn test_render_line_colors_in_token_order() {
        let theme = Theme::idle();
        let line = render_line(&tokenize_line("def foo():"), &theme.syntax, theme.gutter, 1);

        let texts: Vec<&str> = line.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["def", " ", "foo", "(", ")", ":"]);

        let orange = Color::parse("orange").unwrap();
        let blue = Color::parse("blue").unwrap();
        let black = Color::parse("black").unwrap();
        let colors: Vec<Color> = line.segments.iter().map(|s| s.color).collect();
        assert_eq!(colors, vec![orange, black, blue, black, black, black]);

        assert_eq!(line.gutter.text, "   1  ");
        assert_eq!(line.gutter.color, Color::parse("gray").unwrap());
    }

    #[test]
    fn test_render_line_escapes_once() {
        let theme = Theme::idle();
        let line = render_line(&tokenize_line("a < b"), &theme.syntax, theme.gutter, 3);
        let markup = line.to_markup();

        assert!(markup.contains(">&lt;</font>"));
        assert!(!markup.contains("&amp;lt;"));
        assert_eq!(line.display_text(), "a < b");
    }

    #[test]
    fn test_unknown_category_uses_default() {
        let theme = Theme::idle();
        let tokens = vec![LexicalToken::new(TokenCategory::Error, "$")];
        let line = render_line(&tokens, &theme.syntax, theme.gutter, 1);
        assert_eq!(line.segments[0].color, theme.syntax.default_color());
    }

    #[test]
    fn test_render_lines_numbers_consecutively() {
        let theme = Theme::idle();
        let lines = crate::syntax::tokenize_source("a\n\nb\n");
        let numbers: Vec<usize> = render_lines(&lines, &theme)
            .iter()
            .map(|l| l.line_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
