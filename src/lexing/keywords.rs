//! Keyword tables
//!
//!     Reserved words are lexed as Keyword tokens. Contextual words (`get`, `set`, `override`,
//!     `mutating`, `actor`, ...) stay identifiers, since they are legal names elsewhere, and are
//!     matched by text where their position gives them meaning.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Reserved words lexed as [`TokenKind::Keyword`](super::TokenKind::Keyword).
pub static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // declarations
        "associatedtype",
        "class",
        "deinit",
        "enum",
        "extension",
        "fileprivate",
        "func",
        "import",
        "init",
        "inout",
        "internal",
        "let",
        "operator",
        "private",
        "precedencegroup",
        "protocol",
        "public",
        "rethrows",
        "static",
        "struct",
        "subscript",
        "typealias",
        "var",
        // statements
        "break",
        "case",
        "catch",
        "continue",
        "default",
        "defer",
        "do",
        "else",
        "fallthrough",
        "for",
        "guard",
        "if",
        "in",
        "repeat",
        "return",
        "switch",
        "throw",
        "where",
        "while",
        // expressions
        "Any",
        "as",
        "await",
        "false",
        "is",
        "nil",
        "self",
        "Self",
        "super",
        "throws",
        "true",
        "try",
    ]
    .into_iter()
    .collect()
});

/// Declaration modifiers skipped before the introducing keyword of a declaration.
pub static MODIFIERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "borrowing",
        "consuming",
        "convenience",
        "distributed",
        "dynamic",
        "fileprivate",
        "final",
        "indirect",
        "infix",
        "internal",
        "isolated",
        "lazy",
        "mutating",
        "nonisolated",
        "nonmutating",
        "open",
        "optional",
        "override",
        "package",
        "postfix",
        "prefix",
        "private",
        "public",
        "required",
        "static",
        "unowned",
        "weak",
        "__consuming",
    ]
    .into_iter()
    .collect()
});

/// Accessor clauses of a computed property, subscript or observed property.
pub static ACCESSORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["get", "set", "willSet", "didSet", "_read", "_modify"]
        .into_iter()
        .collect()
});

/// Words that introduce a nominal type body.
pub static TYPE_INTRODUCERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["struct", "class", "enum", "extension", "actor"]
        .into_iter()
        .collect()
});

/// Control-flow words whose braces are conditional/loop bodies.
pub static CONTROL_BODIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "if", "else", "guard", "while", "for", "repeat", "do", "catch", "defer",
    ]
    .into_iter()
    .collect()
});

/// Words that open a declaration statement.
pub static DECLARATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "actor",
        "associatedtype",
        "class",
        "deinit",
        "enum",
        "extension",
        "func",
        "import",
        "init",
        "let",
        "operator",
        "precedencegroup",
        "protocol",
        "struct",
        "subscript",
        "typealias",
        "var",
    ]
    .into_iter()
    .collect()
});

/// Words that open a control statement.
pub static CONTROL_STATEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "break",
        "case",
        "continue",
        "default",
        "defer",
        "do",
        "fallthrough",
        "for",
        "guard",
        "if",
        "repeat",
        "return",
        "switch",
        "throw",
        "while",
    ]
    .into_iter()
    .collect()
});

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}
