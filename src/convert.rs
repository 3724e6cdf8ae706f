//! Python source → PDF conversion
//!
//! Reads the input, tokenizes it, formats every line, lays the lines out on
//! pages and writes the PDF. The PDF is built in memory and written through a
//! temporary file in the destination directory, so a failed conversion never
//! leaves a partial output behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::document::{Document, PageStyle};
use crate::render::{render_lines, FormattedLine};
use crate::syntax::tokenize_source;
use crate::theme::Theme;
use crate::util::file_validation::{filename_for_display, read_text_file, FileOpenError};

/// Errors that stop a conversion
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Input path does not exist
    InputNotFound(PathBuf),
    /// Input exists but cannot be used as source text
    InputUnreadable { path: PathBuf, reason: String },
    /// Unknown theme id or invalid theme file
    Theme(String),
    /// Invalid page settings
    Config(String),
    /// Output could not be created, written or renamed into place
    OutputWriteFailure { path: PathBuf, message: String },
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputNotFound(path) => write!(f, "The file {} was not found.", path.display()),
            Self::InputUnreadable { path, reason } => {
                write!(f, "Cannot read {}: {}", path.display(), reason)
            }
            Self::Theme(msg) => write!(f, "Theme error: {}", msg),
            Self::Config(msg) => write!(f, "Invalid settings: {}", msg),
            Self::OutputWriteFailure { path, message } => {
                write!(f, "Failed to write {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub output: PathBuf,
    pub lines: usize,
    pub pages: usize,
    pub bytes: usize,
}

/// `input` with its extension replaced by `.pdf`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Read a source file as text. Invalid UTF-8 is replaced, not rejected.
pub fn read_source(path: &Path) -> Result<String, ConvertError> {
    match read_text_file(path) {
        Ok((text, lossy)) => {
            if lossy {
                tracing::warn!(
                    "{} is not valid UTF-8, invalid bytes were replaced",
                    path.display()
                );
            }
            Ok(text)
        }
        Err(FileOpenError::NotFound) => Err(ConvertError::InputNotFound(path.to_path_buf())),
        Err(e) => Err(ConvertError::InputUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Tokenize and format every line of `source`
pub fn format_source(source: &str, theme: &Theme) -> Vec<FormattedLine> {
    let tokens = tokenize_source(source);
    tracing::debug!(lines = tokens.len(), "Tokenized source");
    render_lines(&tokens, theme)
}

/// Build the document for `source`
pub fn build_document(source: &str, theme: &Theme, style: PageStyle, title: &str) -> Document {
    let mut doc = Document::new(style).with_title(title);
    doc.extend_lines(format_source(source, theme));
    doc
}

/// Convert source text to PDF bytes without touching the filesystem
pub fn render_pdf(source: &str, theme: &Theme, style: &PageStyle, title: &str) -> Vec<u8> {
    build_document(source, theme, style.clone(), title).to_pdf()
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Temp file in `dir` created with the mode a plain `File::create` would get
fn create_temp(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".pyprint-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Masked by the process umask at open
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Write `bytes` to `path` atomically: temp file in the same directory, then rename.
///
/// A replaced file keeps its permissions. A new file gets the usual
/// `0o666` minus umask.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let fail = |message: String| ConvertError::OutputWriteFailure {
        path: path.to_path_buf(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = create_temp(dir).map_err(|e| fail(e.to_string()))?;
    temp.write_all(bytes).map_err(|e| fail(e.to_string()))?;
    temp.flush().map_err(|e| fail(e.to_string()))?;
    if let Ok(existing) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| fail(e.to_string()))?;
    }
    temp.persist(path).map_err(|e| fail(e.error.to_string()))?;
    Ok(())
}

/// Convert `input` to a PDF at `output`
pub fn convert_file(
    input: &Path,
    output: &Path,
    theme: &Theme,
    style: &PageStyle,
) -> Result<ConvertSummary, ConvertError> {
    let source = read_source(input)?;
    if same_file(input, output) {
        return Err(ConvertError::OutputWriteFailure {
            path: output.to_path_buf(),
            message: "output would overwrite the input file".to_string(),
        });
    }

    let doc = build_document(
        &source,
        theme,
        style.clone(),
        &filename_for_display(input),
    );

    let pdf = doc.render();
    write_output(output, &pdf.bytes)?;
    tracing::info!("Converted {} to {}", input.display(), output.display());

    Ok(ConvertSummary {
        output: output.to_path_buf(),
        lines: doc.lines().len(),
        pages: pdf.pages,
        bytes: pdf.bytes.len(),
    })
}
