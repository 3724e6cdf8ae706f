//! Python lexer
//!
//! Raw lexing is done by logos; a second pass assigns [`TokenCategory`]s using
//! a little left-to-right context (the word after `def`, builtins after `.`,
//! decorator lines, docstrings, string prefixes). Fragments logos cannot match
//! become [`TokenCategory::Error`] tokens, so lexing never fails and the
//! token texts always cover the input exactly.

use logos::Logos;
use serde::Serialize;

use super::category::TokenCategory;
use super::words::{builtin_category, is_string_prefix, reserved_category};

/// A categorized fragment of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalToken {
    pub category: TokenCategory,
    pub text: String,
}

impl LexicalToken {
    pub fn new(category: TokenCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Raw tokens of the Python lexical grammar
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    // Explicit line joining
    #[regex(r"\\\r?\n")]
    Continuation,

    #[regex(r"#[^\r\n]*")]
    Comment,

    #[token("'''", |lex| scan_triple_quoted(lex, "'''"))]
    #[token("\"\"\"", |lex| scan_triple_quoted(lex, "\"\"\""))]
    TripleQuoted,

    #[token("'", |lex| scan_quoted(lex, '\''))]
    #[token("\"", |lex| scan_quoted(lex, '"'))]
    Quoted,

    #[regex(r"[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*")]
    Identifier,

    #[regex(r"0[xX][0-9a-fA-F_]+")]
    HexNumber,

    #[regex(r"0[oO][0-7_]+")]
    OctNumber,

    #[regex(r"0[bB][01_]+")]
    BinNumber,

    #[regex(r"[0-9][0-9_]*[jJ]?")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9_]+)?[jJ]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]+)?[jJ]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+[jJ]?")]
    Float,

    #[regex(r"\*\*=?|//=?|<<=?|>>=?|->|:=|!=|[-+*/%@&|^~<>=.]=?")]
    Operator,

    #[regex(r"[()\[\]{}:,;]")]
    Punctuation,
}

/// Consume the body of a single-line string after its opening quote.
///
/// Stops after the closing quote, or before the line break when the string
/// is unterminated. A backslash escapes the following character, including
/// a line break (`\n` or `\r\n`).
fn scan_quoted(lex: &mut logos::Lexer<RawToken>, quote: char) -> bool {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    let mut consumed = rest.len();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                None => {
                    consumed = rest.len();
                    break;
                }
                // An escaped CRLF continues the string like an escaped LF
                Some((j, '\r')) if rest[j + 1..].starts_with('\n') => {
                    chars.next();
                }
                Some(_) => {}
            },
            '\r' | '\n' => {
                consumed = i;
                break;
            }
            c if c == quote => {
                consumed = i + c.len_utf8();
                break;
            }
            _ => {}
        }
    }

    lex.bump(consumed);
    true
}

/// Consume the body of a triple-quoted string up to and including `delimiter`.
///
/// An unterminated string runs to the end of the input.
fn scan_triple_quoted(lex: &mut logos::Lexer<RawToken>, delimiter: &str) -> bool {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    let mut consumed = rest.len();

    while let Some((i, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
            continue;
        }
        if rest[i..].starts_with(delimiter) {
            consumed = i + delimiter.len();
            break;
        }
    }

    lex.bump(consumed);
    true
}

/// Split the source into raw `(kind, text)` pieces covering it without gaps.
/// `None` marks a fragment logos could not match.
fn raw_tokens(source: &str) -> Vec<(Option<RawToken>, &str)> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if span.start > pos {
            tokens.push((None, &source[pos..span.start]));
        }
        tokens.push((result.ok(), &source[span.start..span.end]));
        pos = span.end;
    }

    if pos < source.len() {
        tokens.push((None, &source[pos..]));
    }

    tokens
}

/// Left-to-right context used to refine identifier and string categories
#[derive(Debug, Default)]
struct Context {
    /// Only whitespace seen so far on the current line
    at_line_start: bool,
    /// Inside a `@decorator.name` sequence
    in_decorator: bool,
    /// Previous non-whitespace token
    previous: Option<(RawToken, TokenCategory)>,
    previous_text: String,
}

impl Context {
    fn new() -> Self {
        Self {
            at_line_start: true,
            ..Self::default()
        }
    }

    fn after_keyword(&self, keyword: &str) -> bool {
        matches!(self.previous, Some((_, TokenCategory::Keyword))) && self.previous_text == keyword
    }

    fn after_dot(&self) -> bool {
        matches!(self.previous, Some((RawToken::Operator, _))) && self.previous_text == "."
    }
}

fn classify_identifier(
    text: &str,
    next: Option<&(Option<RawToken>, &str)>,
    ctx: &Context,
) -> TokenCategory {
    let prefixes_string = matches!(
        next,
        Some((Some(RawToken::Quoted | RawToken::TripleQuoted), _))
    );
    if prefixes_string && is_string_prefix(text) {
        return TokenCategory::StringAffix;
    }
    if ctx.in_decorator {
        return TokenCategory::NameDecorator;
    }
    if ctx.after_keyword("def") {
        return if text.len() > 4 && text.starts_with("__") && text.ends_with("__") {
            TokenCategory::NameFunctionMagic
        } else {
            TokenCategory::NameFunction
        };
    }
    if ctx.after_keyword("class") {
        return TokenCategory::NameClass;
    }
    if ctx.after_dot() {
        return TokenCategory::Name;
    }
    reserved_category(text)
        .or_else(|| builtin_category(text))
        .unwrap_or(TokenCategory::Name)
}

/// Lex a whole source text into categorized tokens
///
/// Token boundaries do not respect line breaks: a multi-line string stays a
/// single token. Use [`tokenize_source`] for per-line tokens.
pub fn tokenize(source: &str) -> Vec<LexicalToken> {
    let raw = raw_tokens(source);
    let mut ctx = Context::new();
    let mut tokens = Vec::with_capacity(raw.len());

    for (index, (kind, text)) in raw.iter().enumerate() {
        let category = match kind {
            None => TokenCategory::Error,
            Some(RawToken::Whitespace) | Some(RawToken::Newline) => TokenCategory::Whitespace,
            Some(RawToken::Continuation) => TokenCategory::Text,
            Some(RawToken::Comment) => {
                if index == 0 && text.starts_with("#!") {
                    TokenCategory::CommentHashbang
                } else {
                    TokenCategory::CommentSingle
                }
            }
            Some(RawToken::TripleQuoted) => {
                if ctx.at_line_start {
                    TokenCategory::StringDoc
                } else {
                    TokenCategory::String
                }
            }
            Some(RawToken::Quoted) => TokenCategory::String,
            Some(RawToken::Identifier) => classify_identifier(text, raw.get(index + 1), &ctx),
            Some(RawToken::HexNumber) => TokenCategory::NumberHex,
            Some(RawToken::OctNumber) => TokenCategory::NumberOct,
            Some(RawToken::BinNumber) => TokenCategory::NumberBin,
            Some(RawToken::Integer) => TokenCategory::NumberInteger,
            Some(RawToken::Float) => TokenCategory::NumberFloat,
            Some(RawToken::Operator) => {
                let starts_decorator = *text == "@" && ctx.at_line_start;
                let continues_decorator = *text == "." && ctx.in_decorator;
                if starts_decorator || continues_decorator {
                    TokenCategory::NameDecorator
                } else {
                    TokenCategory::Operator
                }
            }
            Some(RawToken::Punctuation) => TokenCategory::Punctuation,
        };

        match kind {
            Some(RawToken::Whitespace) => {}
            Some(RawToken::Newline) => {
                ctx.at_line_start = true;
                ctx.in_decorator = false;
            }
            Some(raw_kind) => {
                ctx.in_decorator = category == TokenCategory::NameDecorator;
                // A docstring may still follow its prefix on the same line.
                if category != TokenCategory::StringAffix {
                    ctx.at_line_start = false;
                }
                ctx.previous = Some((*raw_kind, category));
                ctx.previous_text.clear();
                ctx.previous_text.push_str(text);
            }
            None => {
                ctx.in_decorator = false;
                ctx.at_line_start = false;
                ctx.previous = None;
                ctx.previous_text.clear();
            }
        }

        tokens.push(LexicalToken::new(category, *text));
    }

    tokens
}

/// Split a token stream into physical lines.
///
/// Each line keeps its trailing `\n`, so a source of `n` newline-terminated
/// lines yields `n` lines and an empty source yields none. Tokens spanning a
/// line break are split at the break and keep their category on both sides.
pub fn split_lines(tokens: Vec<LexicalToken>) -> Vec<Vec<LexicalToken>> {
    let mut lines = Vec::new();
    let mut current: Vec<LexicalToken> = Vec::new();

    for token in tokens {
        if !token.text.contains('\n') {
            current.push(token);
            continue;
        }
        for piece in token.text.split_inclusive('\n') {
            current.push(LexicalToken::new(token.category, piece));
            if piece.ends_with('\n') {
                lines.push(std::mem::take(&mut current));
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Lex a whole source text and return one token sequence per physical line
pub fn tokenize_source(source: &str) -> Vec<Vec<LexicalToken>> {
    split_lines(tokenize(source))
}

/// Lex a single line of text (with or without its trailing newline)
pub fn tokenize_line(line: &str) -> Vec<LexicalToken> {
    tokenize(line)
}
