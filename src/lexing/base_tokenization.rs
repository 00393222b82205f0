//! Base tokenization using the logos lexer library.
//!
//! This is the entry point where source strings become token streams. It is NOT a
//! transformation: transformations operate on the token stream produced here.
//!
//! Literals are scanned by callbacks rather than by regexes, since Swift strings nest: an
//! interpolation `\( ... )` may itself contain string literals, and block comments nest too.
//! A brace inside any literal must never reach the scope tracker.

use crate::lexing::common::{TokenizationError, TokenizationErrorKind};
use crate::lexing::keywords::is_keyword;
use crate::lexing::token::{Token, TokenKind};
use logos::{Lexer, Logos};

/// Errors raised inside the logos lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexingError {
    /// Input the lexer has no rule for. Not fatal: becomes an Unknown token.
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedComment,
}

/// Raw token classes as recognized by logos, before keyword lookup.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexingError)]
pub enum RawToken {
    #[regex(r"[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*")]
    Word,

    // `default`, $0
    #[regex(r"`[^`\r\n]+`")]
    #[regex(r"\$[A-Za-z0-9_]+")]
    EscapedIdentifier,

    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    Attribute,

    // #if, #selector, #available
    #[regex(r"#[A-Za-z_][A-Za-z0-9_]*")]
    Directive,

    #[regex(r"[0-9][0-9A-Za-z_]*")]
    Number,

    #[regex(r"[-+*%=<>!&|^~?\\]+")]
    #[token("/")]
    #[token("/=")]
    Operator,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    LineBreak,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("\"", |lex| string_literal(lex, 0, false))]
    #[token("\"\"\"", |lex| string_literal(lex, 0, true))]
    #[regex("#+\"", raw_string_literal)]
    StringLiteral,
}

impl RawToken {
    fn classify(self, text: &str) -> TokenKind {
        match self {
            RawToken::Word if is_keyword(text) => TokenKind::Keyword,
            RawToken::Word | RawToken::EscapedIdentifier => TokenKind::Identifier,
            RawToken::Attribute => TokenKind::Attribute,
            RawToken::Directive => TokenKind::Keyword,
            RawToken::Number => TokenKind::Number,
            RawToken::Operator => TokenKind::Operator,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::OpenParen => TokenKind::OpenParen,
            RawToken::CloseParen => TokenKind::CloseParen,
            RawToken::OpenBracket => TokenKind::OpenBracket,
            RawToken::CloseBracket => TokenKind::CloseBracket,
            RawToken::OpenBrace => TokenKind::OpenBrace,
            RawToken::CloseBrace => TokenKind::CloseBrace,
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::LineBreak => TokenKind::LineBreak,
            RawToken::LineComment => TokenKind::LineComment,
            RawToken::BlockComment => TokenKind::BlockComment,
            RawToken::StringLiteral => TokenKind::StringLiteral,
        }
    }
}

fn block_comment(lex: &mut Lexer<RawToken>) -> Result<(), LexingError> {
    let consumed = scan_block_comment(lex.remainder()).ok_or(LexingError::UnterminatedComment)?;
    lex.bump(consumed);
    Ok(())
}

fn string_literal(
    lex: &mut Lexer<RawToken>,
    hashes: usize,
    multiline: bool,
) -> Result<(), LexingError> {
    let consumed =
        scan_string(lex.remainder(), hashes, multiline).ok_or(LexingError::UnterminatedString)?;
    lex.bump(consumed);
    Ok(())
}

/// `#"..."#` and `#"""..."""#`
fn raw_string_literal(lex: &mut Lexer<RawToken>) -> Result<(), LexingError> {
    let hashes = lex.slice().len() - 1;
    let rest = lex.remainder();
    let skip = if rest.starts_with("\"\"") { 2 } else { 0 };
    let consumed =
        scan_string(&rest[skip..], hashes, skip > 0).ok_or(LexingError::UnterminatedString)?;
    lex.bump(skip + consumed);
    Ok(())
}

/// Bytes up to and including the `*/` closing a (possibly nested) block comment.
fn scan_block_comment(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Bytes up to and including the closing delimiter of a string body.
///
/// `hashes` is the extended delimiter length (`#"..."#`); escapes then need as many `#` after
/// the backslash. Single-line strings may not contain a line break.
fn scan_string(rest: &str, hashes: usize, multiline: bool) -> Option<usize> {
    let bytes = rest.as_bytes();
    let quotes = if multiline { 3 } else { 1 };
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if repeated(bytes, i + 1, b'#', hashes) => {
                let next = i + 1 + hashes;
                if bytes.get(next) == Some(&b'(') {
                    i = next + 1 + scan_interpolation(&rest[next + 1..])?;
                } else {
                    i = next + 1;
                }
            }
            b'"' if repeated(bytes, i, b'"', quotes) && repeated(bytes, i + quotes, b'#', hashes) => {
                return Some(i + quotes + hashes);
            }
            b'\n' | b'\r' if !multiline => return None,
            _ => i += 1,
        }
    }
    None
}

/// Bytes up to and including the `)` closing an interpolation opened just before `rest`.
fn scan_interpolation(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            b'"' => {
                let multiline = rest[i..].starts_with("\"\"\"");
                let open = if multiline { 3 } else { 1 };
                i += open + scan_string(&rest[i + open..], 0, multiline)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn repeated(bytes: &[u8], at: usize, byte: u8, count: usize) -> bool {
    bytes
        .get(at..at + count)
        .is_some_and(|run| run.iter().all(|b| *b == byte))
}

/// Tokenize source code.
///
/// Every byte of `source` ends up in exactly one token. Line breaks are single LineBreak
/// tokens here; collapsing runs into BlankLine tokens is the job of the blank line
/// transformation.
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizationError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(raw) => raw.classify(lexer.slice()),
            Err(LexingError::UnexpectedCharacter) => TokenKind::Unknown,
            Err(LexingError::UnterminatedString) => {
                return Err(TokenizationError::new(
                    TokenizationErrorKind::UnterminatedString,
                    source,
                    span.start,
                ))
            }
            Err(LexingError::UnterminatedComment) => {
                return Err(TokenizationError::new(
                    TokenizationErrorKind::UnterminatedComment,
                    source,
                    span.start,
                ))
            }
        };
        tokens.push(Token::new(kind, lexer.slice(), span));
    }

    Ok(tokens)
}
