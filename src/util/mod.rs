//! Utility modules

pub mod file_validation;

pub use file_validation::{
    filename_for_display, looks_binary, read_text_file, validate_file_for_opening,
    FileOpenError, MAX_FILE_SIZE,
};
