//! Lexical categories and their parent taxonomy
//!
//! Categories form a tree rooted at [`TokenCategory::Token`]. Every category
//! has a dotted name (`"name.builtin.pseudo"`) that theme files use as a key.
//! Color lookup falls back from a category to its ancestors, so a theme only
//! needs entries for the coarse categories it cares about.

use serde::{Serialize, Serializer};

/// The kind of a lexical token, without any semantic analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenCategory {
    Token,
    Text,
    Whitespace,
    /// Fragments the lexer could not categorize
    Error,
    Keyword,
    KeywordConstant,
    KeywordNamespace,
    Name,
    NameBuiltin,
    NameBuiltinPseudo,
    NameFunction,
    NameFunctionMagic,
    NameClass,
    NameDecorator,
    NameException,
    Literal,
    String,
    StringDoc,
    StringAffix,
    Number,
    NumberInteger,
    NumberFloat,
    NumberHex,
    NumberOct,
    NumberBin,
    Operator,
    OperatorWord,
    Punctuation,
    Comment,
    CommentSingle,
    CommentHashbang,
}

/// Every category paired with its dotted name. Index order is stable.
pub const CATEGORY_NAMES: &[(TokenCategory, &str)] = &[
    (TokenCategory::Token, "token"),
    (TokenCategory::Text, "text"),
    (TokenCategory::Whitespace, "text.whitespace"),
    (TokenCategory::Error, "error"),
    (TokenCategory::Keyword, "keyword"),
    (TokenCategory::KeywordConstant, "keyword.constant"),
    (TokenCategory::KeywordNamespace, "keyword.namespace"),
    (TokenCategory::Name, "name"),
    (TokenCategory::NameBuiltin, "name.builtin"),
    (TokenCategory::NameBuiltinPseudo, "name.builtin.pseudo"),
    (TokenCategory::NameFunction, "name.function"),
    (TokenCategory::NameFunctionMagic, "name.function.magic"),
    (TokenCategory::NameClass, "name.class"),
    (TokenCategory::NameDecorator, "name.decorator"),
    (TokenCategory::NameException, "name.exception"),
    (TokenCategory::Literal, "literal"),
    (TokenCategory::String, "literal.string"),
    (TokenCategory::StringDoc, "literal.string.doc"),
    (TokenCategory::StringAffix, "literal.string.affix"),
    (TokenCategory::Number, "literal.number"),
    (TokenCategory::NumberInteger, "literal.number.integer"),
    (TokenCategory::NumberFloat, "literal.number.float"),
    (TokenCategory::NumberHex, "literal.number.hex"),
    (TokenCategory::NumberOct, "literal.number.oct"),
    (TokenCategory::NumberBin, "literal.number.bin"),
    (TokenCategory::Operator, "operator"),
    (TokenCategory::OperatorWord, "operator.word"),
    (TokenCategory::Punctuation, "punctuation"),
    (TokenCategory::Comment, "comment"),
    (TokenCategory::CommentSingle, "comment.single"),
    (TokenCategory::CommentHashbang, "comment.hashbang"),
];

/// Child → parent edges of the taxonomy. The root has no entry.
const PARENTS: &[(TokenCategory, TokenCategory)] = &[
    (TokenCategory::Text, TokenCategory::Token),
    (TokenCategory::Whitespace, TokenCategory::Text),
    (TokenCategory::Error, TokenCategory::Token),
    (TokenCategory::Keyword, TokenCategory::Token),
    (TokenCategory::KeywordConstant, TokenCategory::Keyword),
    (TokenCategory::KeywordNamespace, TokenCategory::Keyword),
    (TokenCategory::Name, TokenCategory::Token),
    (TokenCategory::NameBuiltin, TokenCategory::Name),
    (TokenCategory::NameBuiltinPseudo, TokenCategory::NameBuiltin),
    (TokenCategory::NameFunction, TokenCategory::Name),
    (TokenCategory::NameFunctionMagic, TokenCategory::NameFunction),
    (TokenCategory::NameClass, TokenCategory::Name),
    (TokenCategory::NameDecorator, TokenCategory::Name),
    (TokenCategory::NameException, TokenCategory::Name),
    (TokenCategory::Literal, TokenCategory::Token),
    (TokenCategory::String, TokenCategory::Literal),
    (TokenCategory::StringDoc, TokenCategory::String),
    (TokenCategory::StringAffix, TokenCategory::String),
    (TokenCategory::Number, TokenCategory::Literal),
    (TokenCategory::NumberInteger, TokenCategory::Number),
    (TokenCategory::NumberFloat, TokenCategory::Number),
    (TokenCategory::NumberHex, TokenCategory::Number),
    (TokenCategory::NumberOct, TokenCategory::Number),
    (TokenCategory::NumberBin, TokenCategory::Number),
    (TokenCategory::Operator, TokenCategory::Token),
    (TokenCategory::OperatorWord, TokenCategory::Operator),
    (TokenCategory::Punctuation, TokenCategory::Token),
    (TokenCategory::Comment, TokenCategory::Token),
    (TokenCategory::CommentSingle, TokenCategory::Comment),
    (TokenCategory::CommentHashbang, TokenCategory::Comment),
];

/// Upper bound on any ancestor walk. A chain longer than the number of
/// categories must contain a cycle.
pub const MAX_DEPTH: usize = CATEGORY_NAMES.len();

impl TokenCategory {
    /// Dotted name used in theme files
    pub fn name(self) -> &'static str {
        CATEGORY_NAMES
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, name)| *name)
            .unwrap_or("token")
    }

    /// Look up a category by dotted name.
    ///
    /// Accepts the short aliases `string.*` and `number.*` for the
    /// `literal.string.*` and `literal.number.*` subtrees.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let find = |candidate: &str| {
            CATEGORY_NAMES
                .iter()
                .find(|(_, n)| *n == candidate)
                .map(|(category, _)| *category)
        };

        find(&name).or_else(|| {
            if name.starts_with("string") || name.starts_with("number") {
                find(&format!("literal.{}", name))
            } else {
                None
            }
        })
    }

    /// Direct parent in the taxonomy, `None` for the root
    pub fn parent(self) -> Option<Self> {
        PARENTS
            .iter()
            .find(|(child, _)| *child == self)
            .map(|(_, parent)| *parent)
    }

    /// This category followed by its ancestors, nearest first.
    ///
    /// Stops after [`MAX_DEPTH`] steps even if the parent table is malformed.
    pub fn ancestors(self) -> impl Iterator<Item = TokenCategory> {
        std::iter::successors(Some(self), |category| category.parent()).take(MAX_DEPTH)
    }
}

impl std::fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl Serialize for TokenCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
