//! Syntax highlighting module
//!
//! Provides logos based lexical highlighting for Python source:
//! - A category taxonomy with parent fallback for theme lookup
//! - A lexer that splits source into categorized fragments per line
//!
//! ## Architecture
//!
//! ```text
//! source text → logos raw tokens → context pass (def/class/builtins/docstrings)
//!             → Vec<LexicalToken> → split at '\n' → one Vec per physical line
//! ```

mod category;
mod lexer;
mod words;

pub use category::{TokenCategory, CATEGORY_NAMES, MAX_DEPTH};
pub use lexer::{split_lines, tokenize, tokenize_line, tokenize_source, LexicalToken};
