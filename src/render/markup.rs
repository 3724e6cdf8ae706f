//! Inline markup helpers
//!
//! Source fragments are escaped exactly once, before they are wrapped in a
//! `<font>` span. [`unescape_markup`] is the inverse used by the page layout
//! to recover the characters to draw.

use crate::theme::Color;

/// Escape markup special characters
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Reverse [`escape_markup`]
///
/// Unknown entities are left as they are.
pub fn unescape_markup(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    const ENTITIES: &[(&str, char)] = &[
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#x27;", '\''),
    ];

    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, ch)) => {
                result.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Wrap already-escaped text in a color span
pub fn font_span(color: Color, escaped: &str) -> String {
    format!("<font color=\"{}\">{}</font>", color.to_hex(), escaped)
}
