//! Page-level style: paper size, margins, font and spacing

use serde::{Deserialize, Serialize};

use crate::theme::Color;

/// Advance width of every Courier glyph, in units of the font size
pub const MONOSPACE_ADVANCE: f32 = 0.6;

/// Accepted font sizes in points
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=144.0;

/// Accepted baseline distances in points
pub const LEADING_RANGE: std::ops::RangeInclusive<f32> = 1.0..=500.0;

/// Widest tab stop, in columns
pub const MAX_TAB_WIDTH: usize = 16;

/// Paper sizes in PDF points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
}

impl PageSize {
    /// `(width, height)` in points, portrait
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.2756, 841.8898),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
        }
    }
}

/// The monospaced standard Type 1 fonts every PDF reader provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Courier", alias = "courier")]
    Courier,
    #[serde(rename = "Courier-Bold", alias = "courier-bold")]
    CourierBold,
    #[serde(rename = "Courier-Oblique", alias = "courier-oblique")]
    CourierOblique,
    #[serde(rename = "Courier-BoldOblique", alias = "courier-bold-oblique")]
    CourierBoldOblique,
}

impl FontFamily {
    /// PostScript name used as the PDF `BaseFont`
    pub fn base_font(self) -> &'static str {
        match self {
            FontFamily::Courier => "Courier",
            FontFamily::CourierBold => "Courier-Bold",
            FontFamily::CourierOblique => "Courier-Oblique",
            FontFamily::CourierBoldOblique => "Courier-BoldOblique",
        }
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    /// Same margin on all four sides
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(50.0)
    }
}

/// Style shared by every page of a document
#[derive(Debug, Clone, PartialEq)]
pub struct PageStyle {
    pub page_size: PageSize,
    pub margins: Margins,
    pub font: FontFamily,
    pub font_size: f32,
    /// Distance between baselines
    pub leading: f32,
    pub tab_width: usize,
    pub background: Color,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margins: Margins::default(),
            font: FontFamily::Courier,
            font_size: 9.0,
            leading: 12.0,
            tab_width: 4,
            background: Color::rgb(0xFE, 0xFD, 0xFD),
        }
    }
}

impl PageStyle {
    pub fn page_width(&self) -> f32 {
        self.page_size.dimensions().0
    }

    pub fn page_height(&self) -> f32 {
        self.page_size.dimensions().1
    }

    pub fn char_width(&self) -> f32 {
        self.font_size * MONOSPACE_ADVANCE
    }

    /// Width of the text frame between the left and right margins
    pub fn frame_width(&self) -> f32 {
        self.page_width() - self.margins.left - self.margins.right
    }

    /// Height of the text frame between the top and bottom margins
    pub fn frame_height(&self) -> f32 {
        self.page_height() - self.margins.top - self.margins.bottom
    }

    /// Number of characters that fit on one row (at least 1)
    pub fn columns(&self) -> usize {
        ((self.frame_width() / self.char_width()).floor() as usize).max(1)
    }

    /// Number of rows that fit on one page (at least 1)
    pub fn rows_per_page(&self) -> usize {
        (((self.frame_height() - self.font_size) / self.leading).floor() as usize)
            .saturating_add(1)
            .max(1)
    }

    /// Check that the style leaves room for at least one character
    pub fn validate(&self) -> Result<(), String> {
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(format!(
                "font size must be between {} and {}, got {}",
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end(),
                self.font_size
            ));
        }
        if !LEADING_RANGE.contains(&self.leading) {
            return Err(format!(
                "line spacing must be between {} and {}, got {}",
                LEADING_RANGE.start(),
                LEADING_RANGE.end(),
                self.leading
            ));
        }
        let margins = [
            self.margins.top,
            self.margins.bottom,
            self.margins.left,
            self.margins.right,
        ];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err("margins must not be negative".to_string());
        }
        if self.frame_width() < self.char_width() || self.frame_height() < self.font_size {
            return Err(format!(
                "margins leave no room for text on a {:?} page",
                self.page_size
            ));
        }
        if !(1..=MAX_TAB_WIDTH).contains(&self.tab_width) {
            return Err(format!(
                "tab width must be between 1 and {}, got {}",
                MAX_TAB_WIDTH, self.tab_width
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_a4_geometry() {
        let style = PageStyle::default();
        assert!((style.frame_width() - 495.2756).abs() < 0.001);
        // 495.27 / 5.4 = 91.7
        assert_eq!(style.columns(), 91);
        // (741.89 - 9) / 12 = 61.07 → 61 gaps, 62 rows
        assert_eq!(style.rows_per_page(), 62);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let style = PageStyle {
            font_size: 0.0,
            ..PageStyle::default()
        };
        assert!(style.validate().is_err());

        let style = PageStyle {
            margins: Margins::uniform(400.0),
            ..PageStyle::default()
        };
        assert!(style.validate().is_err());

        let style = PageStyle {
            leading: f32::NAN,
            ..PageStyle::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_validate_bounds() {
        let tiny_leading = PageStyle {
            leading: 1e-30,
            ..PageStyle::default()
        };
        assert!(tiny_leading.validate().is_err());

        let huge_font = PageStyle {
            font_size: 1e6,
            ..PageStyle::default()
        };
        assert!(huge_font.validate().is_err());

        let huge_tab = PageStyle {
            tab_width: usize::MAX,
            ..PageStyle::default()
        };
        assert!(huge_tab.validate().is_err());

        let widest_tab = PageStyle {
            tab_width: MAX_TAB_WIDTH,
            ..PageStyle::default()
        };
        assert!(widest_tab.validate().is_ok());
    }

    #[test]
    fn test_rows_per_page_saturates() {
        let style = PageStyle {
            leading: 1e-30,
            ..PageStyle::default()
        };
        assert_eq!(style.rows_per_page(), usize::MAX);
    }

    #[test]
    fn test_font_names() {
        assert_eq!(FontFamily::Courier.base_font(), "Courier");
        assert_eq!(FontFamily::CourierBoldOblique.base_font(), "Courier-BoldOblique");
    }
}
