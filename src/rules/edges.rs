//! Locating the line ends rules edit.

use crate::lexing::{Token, TokenKind};

/// Line end that finishes the line holding `tokens[index]`, if only whitespace and comments
/// follow it on that line.
pub fn line_end_following(tokens: &[Token], index: usize) -> Option<usize> {
    let next = (index + 1..tokens.len()).find(|&i| !tokens[i].is_trivia())?;
    tokens[next].is_line_end().then_some(next)
}

/// Line end just before the line holding `tokens[close]`, if only indentation separates them.
pub fn line_end_preceding(tokens: &[Token], close: usize) -> Option<usize> {
    let prev = (0..close)
        .rev()
        .find(|&i| tokens[i].kind != TokenKind::Whitespace)?;
    tokens[prev].is_line_end().then_some(prev)
}
