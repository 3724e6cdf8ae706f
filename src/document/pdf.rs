//! PDF backend built on `pdf-writer`
//!
//! Object layout: catalog, page tree, font and info dictionary first, then a
//! page object and its content stream for every page. Nothing time-dependent
//! is written, so the same input always produces the same bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Ref, Str, TextStr};

use super::layout::{Page, Run};
use super::style::PageStyle;
use super::{Canvas, PageHook, PageInfo, Rect};
use crate::theme::Color;

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const FONT_ID: Ref = Ref::new(3);
const INFO_ID: Ref = Ref::new(4);

/// Resource name of the single font
const FONT_NAME: Name<'static> = Name(b"F1");

const PRODUCER: &str = "pyprint";

fn page_id(index: usize) -> Ref {
    Ref::new(5 + 2 * index as i32)
}

fn content_id(index: usize) -> Ref {
    Ref::new(6 + 2 * index as i32)
}

/// Map a character onto WinAnsiEncoding (Windows-1252)
fn win_ansi_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        ' '..='~' => ch as u8,
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Encode text for a standard Type 1 font. Characters outside
/// WinAnsiEncoding are drawn as `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| win_ansi_byte(ch).unwrap_or(b'?'))
        .collect()
}

/// [`Canvas`] that records drawing operators into one page's content stream
pub struct PdfCanvas {
    content: Content,
    font_size: f32,
}

impl PdfCanvas {
    pub fn new(font_size: f32) -> Self {
        Self {
            content: Content::new(),
            font_size,
        }
    }

    fn set_fill(&mut self, color: Color) {
        let (r, g, b) = color.to_rgb_f32();
        self.content.set_fill_rgb(r, g, b);
    }

    /// The encoded content stream
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }
}

impl Canvas for PdfCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.content.save_state();
        self.set_fill(color);
        self.content.rect(rect.x, rect.y, rect.width, rect.height);
        self.content.fill_nonzero();
        self.content.restore_state();
    }

    fn draw_runs(&mut self, x: f32, y: f32, runs: &[Run]) {
        if runs.is_empty() {
            return;
        }
        self.content.begin_text();
        self.content.set_font(FONT_NAME, self.font_size);
        self.content.next_line(x, y);
        for run in runs {
            self.set_fill(run.color);
            self.content.show(Str(&encode_win_ansi(&run.text)));
        }
        self.content.end_text();
    }
}

/// Baseline of row `row` counted from the top of the text frame
fn baseline(style: &PageStyle, row: usize) -> f32 {
    style.page_height() - style.margins.top - style.font_size - row as f32 * style.leading
}

/// Serializes laid-out pages, running its hooks on every page first
pub struct PdfBackend<'a> {
    hooks: &'a [&'a dyn PageHook],
}

impl<'a> PdfBackend<'a> {
    pub fn new(hooks: &'a [&'a dyn PageHook]) -> Self {
        Self { hooks }
    }

    pub fn render(&self, pages: &[Page], style: &PageStyle, title: Option<&str>) -> Vec<u8> {
        write_pdf(pages, style, self.hooks, title)
    }
}

fn write_pdf(
    pages: &[Page],
    style: &PageStyle,
    hooks: &[&dyn PageHook],
    title: Option<&str>,
) -> Vec<u8> {
    let mut pdf = Pdf::new();

    pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
    pdf.pages(PAGE_TREE_ID)
        .kids((0..pages.len()).map(page_id))
        .count(pages.len() as i32);

    pdf.type1_font(FONT_ID)
        .base_font(Name(style.font.base_font().as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let mut info = pdf.document_info(INFO_ID);
    if let Some(title) = title {
        info.title(TextStr(title));
    }
    info.producer(TextStr(PRODUCER));
    info.finish();

    let media_box = pdf_writer::Rect::new(0.0, 0.0, style.page_width(), style.page_height());

    for (index, page) in pages.iter().enumerate() {
        let mut page_obj = pdf.page(page_id(index));
        page_obj
            .media_box(media_box)
            .parent(PAGE_TREE_ID)
            .contents(content_id(index));
        page_obj.resources().fonts().pair(FONT_NAME, FONT_ID);
        page_obj.finish();

        let info = PageInfo {
            index,
            count: pages.len(),
        };
        let mut canvas = PdfCanvas::new(style.font_size);
        for hook in hooks {
            hook.before_content(&mut canvas, style, info);
        }
        for (row_index, row) in page.rows.iter().enumerate() {
            canvas.draw_runs(style.margins.left, baseline(style, row_index), &row.runs);
        }

        pdf.stream(content_id(index), &canvas.finish());
    }

    pdf.finish()
}
