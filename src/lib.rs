//! pyprint - Python source to colorized PDF
//!
//! Pipeline: [`syntax`] tokenizes the source, [`theme`] maps token categories
//! to colors, [`render`] formats each line with a line-number gutter,
//! [`document`] lays the lines out on pages and writes the PDF. [`convert`]
//! drives the whole thing for one file.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod convert;
pub mod document;
pub mod render;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::PrintConfig;
pub use convert::{convert_file, ConvertError, ConvertSummary};
pub use document::{Document, PageStyle};
pub use theme::Theme;
