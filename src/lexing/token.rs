//! Core token types shared across the tokenizer, the scope tracker and the rules.
//!
//!     A token is a classified slice of the source text together with its byte range. The
//!     token stream is lossless: concatenating the text of every token reproduces the input
//!     byte for byte. Whitespace, comments and line breaks are therefore tokens too, and the
//!     rest of the pipeline decides which of them are significant.
//!
//! Line Ends
//!
//!     A single line break is a LineBreak token. A run of two or more line breaks (with nothing
//!     but horizontal whitespace between them) is collapsed by the blank line transformation
//!     into one BlankLine token that carries how many breaks it stands for. Every rule relies
//!     on this distinction to tell "a blank line already exists" from "only a line break
//!     exists", which is what keeps the rules idempotent.

use serde::Serialize;
use std::ops::Range;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Identifier,
    Keyword,
    /// `@objc`, `@available`, `@unknown`
    Attribute,
    Number,
    Operator,
    Dot,
    Comma,
    Colon,
    Semicolon,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    /// Horizontal whitespace only
    Whitespace,
    LineBreak,
    /// Two or more consecutive line breaks, collapsed
    BlankLine {
        breaks: usize,
    },
    LineComment,
    BlockComment,
    StringLiteral,
    /// Characters the lexer has no class for. Kept so the stream stays lossless.
    Unknown,
}

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Whitespace and comments: tokens that never carry structure.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// LineBreak or BlankLine
    pub fn is_line_end(&self) -> bool {
        matches!(self.kind, TokenKind::LineBreak | TokenKind::BlankLine { .. })
    }

    pub fn is_blank_line(&self) -> bool {
        matches!(self.kind, TokenKind::BlankLine { .. })
    }

    /// Anything that is neither trivia nor a line end.
    pub fn is_significant(&self) -> bool {
        !self.is_trivia() && !self.is_line_end()
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    /// Matches identifiers and keywords by text. Contextual keywords such as `get`, `override`
    /// or `actor` are lexed as identifiers, so most lookups go through here.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::Keyword) && self.text == word
    }

    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    /// Opening paren or bracket
    pub fn opens_group(&self) -> bool {
        matches!(self.kind, TokenKind::OpenParen | TokenKind::OpenBracket)
    }

    /// Closing paren or bracket
    pub fn closes_group(&self) -> bool {
        matches!(self.kind, TokenKind::CloseParen | TokenKind::CloseBracket)
    }
}

/// Concatenates token text back into source.
pub fn render(tokens: &[Token]) -> String {
    let capacity = tokens.iter().map(|token| token.text.len()).sum();
    let mut output = String::with_capacity(capacity);
    for token in tokens {
        output.push_str(&token.text);
    }
    output
}

/// Index of the closest significant token before `index`.
pub fn prev_significant(tokens: &[Token], index: usize) -> Option<usize> {
    tokens[..index.min(tokens.len())]
        .iter()
        .rposition(Token::is_significant)
}

/// Index of the closest significant token after `index`.
pub fn next_significant(tokens: &[Token], index: usize) -> Option<usize> {
    let start = index + 1;
    if start >= tokens.len() {
        return None;
    }
    tokens[start..]
        .iter()
        .position(Token::is_significant)
        .map(|offset| start + offset)
}
