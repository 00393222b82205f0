//! Common lexing types: tokenization errors and source positions.

use crate::lexing::token::Token;
use serde::Serialize;

/// 1-based line and column (in characters) of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let before = source.get(..offset).unwrap_or(source);
        Self::after(before)
    }

    /// Position of the first character of `tokens[index]`.
    pub fn of_token(tokens: &[Token], index: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for token in &tokens[..index.min(tokens.len())] {
            for ch in token.text.chars() {
                if ch == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
        }
        SourcePosition { line, column }
    }

    fn after(text: &str) -> Self {
        let line = text.matches('\n').count() + 1;
        let last_line = text.rsplit('\n').next().unwrap_or("");
        SourcePosition {
            line,
            column: last_line.chars().count() + 1,
        }
    }
}

/// Which literal was left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum TokenizationErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
}

/// A string or comment literal runs off the end of its line or of the input.
///
/// Fatal: no tokens are produced and the caller keeps its original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind} at line {}, column {}", .position.line, .position.column)]
pub struct TokenizationError {
    pub kind: TokenizationErrorKind,
    pub offset: usize,
    pub position: SourcePosition,
}

impl TokenizationError {
    pub fn new(kind: TokenizationErrorKind, source: &str, offset: usize) -> Self {
        TokenizationError {
            kind,
            offset,
            position: SourcePosition::from_offset(source, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::token::TokenKind;

    #[test]
    fn test_position_from_offset() {
        let source = "ab\ncde\nf";
        assert_eq!(
            SourcePosition::from_offset(source, 0),
            SourcePosition { line: 1, column: 1 }
        );
        assert_eq!(
            SourcePosition::from_offset(source, 4),
            SourcePosition { line: 2, column: 2 }
        );
        assert_eq!(
            SourcePosition::from_offset(source, 7),
            SourcePosition { line: 3, column: 1 }
        );
    }

    #[test]
    fn test_position_counts_characters_not_bytes() {
        let source = "é = \"";
        assert_eq!(
            SourcePosition::from_offset(source, 5),
            SourcePosition { line: 1, column: 5 }
        );
    }

    #[test]
    fn test_position_of_token() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "a", 0..1),
            Token::new(TokenKind::BlankLine { breaks: 2 }, "\n\n", 1..3),
            Token::new(TokenKind::Whitespace, "  ", 3..5),
            Token::new(TokenKind::CloseBrace, "}", 5..6),
        ];
        assert_eq!(
            SourcePosition::of_token(&tokens, 3),
            SourcePosition { line: 3, column: 3 }
        );
    }

    #[test]
    fn test_error_display() {
        let err = TokenizationError::new(TokenizationErrorKind::UnterminatedString, "x\n \"a", 3);
        assert_eq!(
            err.to_string(),
            "unterminated string literal at line 2, column 2"
        );
    }
}
