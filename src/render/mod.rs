//! Line rendering: tokens → escaped, colored segments with a line-number gutter

mod line;
mod markup;

pub use line::{
    gutter_label, render_line, render_lines, FormattedLine, Segment, GUTTER_DIGITS,
    GUTTER_PADDING,
};
pub use markup::{escape_markup, font_span, unescape_markup};
