//! Reserved words and builtin names of the Python grammar

use super::category::TokenCategory;

pub const KEYWORDS: &[&str] = &[
    "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif", "else",
    "except", "finally", "for", "global", "if", "lambda", "nonlocal", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

pub const KEYWORD_CONSTANTS: &[&str] = &["True", "False", "None"];

pub const NAMESPACE_KEYWORDS: &[&str] = &["import", "from"];

pub const WORD_OPERATORS: &[&str] = &["and", "or", "not", "in", "is"];

pub const BUILTINS: &[&str] = &[
    "__import__", "abs", "aiter", "all", "anext", "any", "ascii", "bin", "bool", "breakpoint",
    "bytearray", "bytes", "callable", "chr", "classmethod", "compile", "complex", "delattr",
    "dict", "dir", "divmod", "enumerate", "eval", "exec", "filter", "float", "format",
    "frozenset", "getattr", "globals", "hasattr", "hash", "help", "hex", "id", "input", "int",
    "isinstance", "issubclass", "iter", "len", "list", "locals", "map", "max", "memoryview",
    "min", "next", "object", "oct", "open", "ord", "pow", "print", "property", "range", "repr",
    "reversed", "round", "set", "setattr", "slice", "sorted", "staticmethod", "str", "sum",
    "super", "tuple", "type", "vars", "zip",
];

pub const PSEUDO_BUILTINS: &[&str] = &["self", "cls", "Ellipsis", "NotImplemented"];

pub const EXCEPTIONS: &[&str] = &[
    "ArithmeticError", "AssertionError", "AttributeError", "BaseException",
    "BaseExceptionGroup", "BlockingIOError", "BrokenPipeError", "BufferError", "BytesWarning",
    "ChildProcessError", "ConnectionAbortedError", "ConnectionError", "ConnectionRefusedError",
    "ConnectionResetError", "DeprecationWarning", "EOFError", "EncodingWarning",
    "EnvironmentError", "Exception", "ExceptionGroup", "FileExistsError", "FileNotFoundError",
    "FloatingPointError", "FutureWarning", "GeneratorExit", "IOError", "ImportError",
    "ImportWarning", "IndentationError", "IndexError", "InterruptedError", "IsADirectoryError",
    "KeyError", "KeyboardInterrupt", "LookupError", "MemoryError", "ModuleNotFoundError",
    "NameError", "NotADirectoryError", "NotImplementedError", "OSError", "OverflowError",
    "PendingDeprecationWarning", "PermissionError", "ProcessLookupError", "RecursionError",
    "ReferenceError", "ResourceWarning", "RuntimeError", "RuntimeWarning", "StopAsyncIteration",
    "StopIteration", "SyntaxError", "SyntaxWarning", "SystemError", "SystemExit", "TabError",
    "TimeoutError", "TypeError", "UnboundLocalError", "UnicodeDecodeError", "UnicodeEncodeError",
    "UnicodeError", "UnicodeTranslateError", "UnicodeWarning", "UserWarning", "ValueError",
    "Warning", "ZeroDivisionError",
];

/// Category of a reserved word, or `None` for ordinary identifiers
pub fn reserved_category(word: &str) -> Option<TokenCategory> {
    if KEYWORDS.contains(&word) {
        Some(TokenCategory::Keyword)
    } else if KEYWORD_CONSTANTS.contains(&word) {
        Some(TokenCategory::KeywordConstant)
    } else if NAMESPACE_KEYWORDS.contains(&word) {
        Some(TokenCategory::KeywordNamespace)
    } else if WORD_OPERATORS.contains(&word) {
        Some(TokenCategory::OperatorWord)
    } else {
        None
    }
}

/// Category of a builtin name, or `None` if `word` is not a builtin
pub fn builtin_category(word: &str) -> Option<TokenCategory> {
    if BUILTINS.contains(&word) {
        Some(TokenCategory::NameBuiltin)
    } else if PSEUDO_BUILTINS.contains(&word) {
        Some(TokenCategory::NameBuiltinPseudo)
    } else if EXCEPTIONS.contains(&word) {
        Some(TokenCategory::NameException)
    } else {
        None
    }
}

/// Check whether `word` may prefix a string literal (`r"..."`, `Rb'...'`, `f"..."`)
pub fn is_string_prefix(word: &str) -> bool {
    matches!(
        word.to_ascii_lowercase().as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}
