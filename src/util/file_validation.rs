//! Checks run on a source file before it is read
//!
//! A file must exist, be a regular file, fit in memory comfortably and look
//! like text. Decoding itself is lossy, so a file that passes these checks
//! always converts.

use std::fs;
use std::path::Path;

/// Largest source file accepted (16 MB)
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Bytes sampled when sniffing for binary content
const SNIFF_LEN: usize = 8192;

/// Reasons a source file cannot be opened
#[derive(Debug, Clone, PartialEq)]
pub enum FileOpenError {
    NotFound,
    PermissionDenied,
    IsDirectory,
    /// Contains NUL bytes near the start
    BinaryFile,
    TooLarge { size_mb: f64 },
    IoError(String),
}

impl std::fmt::Display for FileOpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IsDirectory => write!(f, "is a directory"),
            Self::BinaryFile => write!(f, "binary file"),
            Self::TooLarge { size_mb } => write!(f, "file too large ({:.1} MB)", size_mb),
            Self::IoError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FileOpenError {}

impl From<std::io::Error> for FileOpenError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::IoError(e.to_string()),
        }
    }
}

/// Check existence, kind and size. Content is checked by [`looks_binary`].
pub fn validate_file_for_opening(path: &Path) -> Result<(), FileOpenError> {
    let metadata = fs::metadata(path)?;

    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileOpenError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }

    Ok(())
}

/// Whether the leading bytes contain a NUL
pub fn looks_binary(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(SNIFF_LEN)].contains(&0)
}

/// Validate, read and decode a source file.
///
/// Invalid UTF-8 is replaced with U+FFFD; the flag reports whether that
/// happened. A leading byte order mark is dropped.
pub fn read_text_file(path: &Path) -> Result<(String, bool), FileOpenError> {
    validate_file_for_opening(path)?;
    let bytes = fs::read(path)?;
    if looks_binary(&bytes) {
        return Err(FileOpenError::BinaryFile);
    }

    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok((text.to_string(), false)),
        Err(_) => Ok((String::from_utf8_lossy(bytes).into_owned(), true)),
    }
}

/// File name for messages, falling back to the full path
pub fn filename_for_display(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.display().to_string(),
    }
}
