//! Document assembly
//!
//! Takes formatted lines in order, lays them out on pages and hands the pages
//! to a drawing backend. Page decoration such as the background fill is
//! expressed as [`PageHook`]s that run on every page before any text is
//! drawn, so the backend only has to provide a [`Canvas`].

mod layout;
mod pdf;
mod style;

pub use layout::{paginate, wrap_line, Page, Row, Run};
pub use pdf::{encode_win_ansi, PdfBackend, PdfCanvas};
pub use style::{
    FontFamily, Margins, PageSize, PageStyle, FONT_SIZE_RANGE, LEADING_RANGE, MAX_TAB_WIDTH,
    MONOSPACE_ADVANCE,
};

use crate::render::FormattedLine;
use crate::theme::Color;

/// Axis-aligned rectangle in PDF user space (origin bottom-left, points)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Position of a page within the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 0-based page index
    pub index: usize,
    pub count: usize,
}

/// Drawing operations a backend provides for one page
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `runs` left to right starting at baseline `(x, y)`
    fn draw_runs(&mut self, x: f32, y: f32, runs: &[Run]);
}

/// Decoration drawn on every page before its content
pub trait PageHook {
    fn before_content(&self, canvas: &mut dyn Canvas, style: &PageStyle, page: PageInfo);
}

/// Paints the whole page in one color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundFill {
    pub color: Color,
}

impl PageHook for BackgroundFill {
    fn before_content(&self, canvas: &mut dyn Canvas, style: &PageStyle, _page: PageInfo) {
        canvas.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                width: style.page_width(),
                height: style.page_height(),
            },
            self.color,
        );
    }
}

/// Formatted lines plus the page style they are printed with
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub style: PageStyle,
    /// Stored in the PDF info dictionary
    pub title: Option<String>,
    lines: Vec<FormattedLine>,
}

impl Document {
    pub fn new(style: PageStyle) -> Self {
        Self {
            style,
            title: None,
            lines: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append lines. Lines are printed in the order they are added.
    pub fn extend_lines(&mut self, lines: impl IntoIterator<Item = FormattedLine>) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[FormattedLine] {
        &self.lines
    }

    /// Lay out the lines. Always at least one page, so an empty document
    /// still gets a decorated page.
    pub fn layout(&self) -> Vec<Page> {
        let mut pages = paginate(&self.lines, &self.style);
        if pages.is_empty() {
            pages.push(Page::default());
        }
        pages
    }

    /// Render with the background fill as the only page hook
    pub fn render(&self) -> RenderedPdf {
        let background = BackgroundFill {
            color: self.style.background,
        };
        let hooks: [&dyn PageHook; 1] = [&background];
        self.render_with_hooks(&hooks)
    }

    /// Render, running `hooks` in order on every page before its text
    pub fn render_with_hooks(&self, hooks: &[&dyn PageHook]) -> RenderedPdf {
        let pages = self.layout();
        tracing::debug!(
            lines = self.lines.len(),
            pages = pages.len(),
            "Assembling PDF"
        );
        let bytes = PdfBackend::new(hooks).render(&pages, &self.style, self.title.as_deref());
        RenderedPdf {
            bytes,
            pages: pages.len(),
        }
    }

    /// Serialize to PDF with the background fill as the only page hook
    pub fn to_pdf(&self) -> Vec<u8> {
        self.render().bytes
    }

    /// Serialize to PDF, running `hooks` in order on every page before its text
    pub fn to_pdf_with_hooks(&self, hooks: &[&dyn PageHook]) -> Vec<u8> {
        self.render_with_hooks(hooks).bytes
    }
}

/// A serialized PDF and its page count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_lines;
    use crate::syntax::tokenize_source;
    use crate::theme::Theme;

    /// Records canvas calls for assertions
    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.calls
                .push(format!("fill {}x{} {}", rect.width, rect.height, color.to_hex()));
        }

        fn draw_runs(&mut self, _x: f32, _y: f32, runs: &[Run]) {
            let text: String = runs.iter().map(|r| r.text.as_str()).collect();
            self.calls.push(format!("text {}", text));
        }
    }

    #[test]
    fn test_background_hook_fills_whole_page() {
        let style = PageStyle::default();
        let hook = BackgroundFill {
            color: Color::rgb(0xFE, 0xFD, 0xFD),
        };
        let mut canvas = RecordingCanvas::default();
        hook.before_content(&mut canvas, &style, PageInfo { index: 0, count: 1 });

        assert_eq!(
            canvas.calls,
            vec![format!(
                "fill {}x{} #fefdfd",
                style.page_width(),
                style.page_height()
            )]
        );
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let doc = Document::new(PageStyle::default());
        assert_eq!(doc.layout().len(), 1);
        assert!(doc.layout()[0].rows.is_empty());
    }

    #[test]
    fn test_render_reports_page_count() {
        let theme = Theme::idle();
        let source: String = (0..100).map(|i| format!("x{} = {}\n", i, i)).collect();
        let mut doc = Document::new(PageStyle::default());
        doc.extend_lines(render_lines(&tokenize_source(&source), &theme));

        let pdf = doc.render();
        assert_eq!(pdf.pages, doc.layout().len());
        assert_eq!(pdf.pages, 2);
        assert_eq!(pdf.bytes, doc.to_pdf());
    }

    #[test]
    fn test_lines_keep_push_order() {
        let theme = Theme::idle();
        let mut doc = Document::new(PageStyle::default());
        doc.extend_lines(render_lines(&tokenize_source("a\nb\n"), &theme));

        let numbers: Vec<usize> = doc.lines().iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
