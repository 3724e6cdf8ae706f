//! Command-line argument parsing
//!
//! Subcommands:
//! - `convert`: Python file to PDF
//! - `themes`: list available themes
//! - `tokens` / `markup`: debugging dumps of the tokenizer and line renderer

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::PrintConfig;
use crate::convert::default_output_path;
use crate::document::{FontFamily, Margins, PageSize};

/// Print Python source files to PDF with IDLE-style syntax colors
#[derive(Parser, Debug)]
#[command(name = "pyprint", version, about = "Print Python source files to PDF")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a Python file to a colorized PDF
    Convert(ConvertArgs),
    /// List built-in and user themes
    Themes,
    /// Print the tokens of every line
    Tokens {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Print the inline markup of every line
    Markup {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Theme id or path to a theme YAML file
        #[arg(long, value_name = "ID|PATH")]
        theme: Option<String>,
    },
}

/// Options of the `convert` subcommand. Unset options fall back to the
/// config file.
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct ConvertArgs {
    /// Python source file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// PDF to write (default: INPUT with a .pdf extension)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Theme id or path to a theme YAML file
    #[arg(long, value_name = "ID|PATH")]
    pub theme: Option<String>,

    /// Font size in points
    #[arg(long, value_name = "PT")]
    pub font_size: Option<f32>,

    /// Distance between baselines in points
    #[arg(long, value_name = "PT")]
    pub leading: Option<f32>,

    /// Margin on all four sides in points
    #[arg(long, value_name = "PT")]
    pub margin: Option<f32>,

    #[arg(long, value_enum)]
    pub page_size: Option<PageSize>,

    #[arg(long, value_enum)]
    pub font: Option<FontFamily>,

    /// Columns per tab stop
    #[arg(long, value_name = "N")]
    pub tab_width: Option<usize>,

    /// Config file to use instead of ~/.config/pyprint/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Explicit output, or the input path with a `.pdf` extension
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }

    /// Config file values, before flags are applied
    pub fn base_config(&self) -> PrintConfig {
        match &self.config {
            Some(path) => PrintConfig::load_from(path),
            None => PrintConfig::load(),
        }
    }

    /// Override config values with the flags that were given
    pub fn apply_to(&self, config: &mut PrintConfig) {
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(leading) = self.leading {
            config.leading = leading;
        }
        if let Some(margin) = self.margin {
            config.margins = Margins::uniform(margin);
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(font) = self.font {
            config.font = font;
        }
        if let Some(tab_width) = self.tab_width {
            config.tab_width = tab_width;
        }
    }

    /// Effective settings for this conversion
    pub fn resolve_config(&self) -> PrintConfig {
        let mut config = self.base_config();
        self.apply_to(&mut config);
        config
    }
}
