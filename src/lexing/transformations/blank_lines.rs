//! Blank line transformation
//!
//! This module collapses runs of consecutive LineBreak tokens into a single BlankLine token.
//! A blank line is two or more line breaks with nothing but horizontal whitespace between
//! them. Unlike the parser-side blank line handling, nothing is dropped: the BlankLine token
//! keeps the full text of the run (whitespace-only lines included), so the stream stays
//! lossless.

use crate::lexing::token::{Token, TokenKind};
use crate::lexing::transformations::Transformation;

/// Blank line transformation
///
/// Converts `LineBreak (Whitespace? LineBreak)+` into one BlankLine carrying the break count.
pub struct TransformBlankLines;

impl Transformation for TransformBlankLines {
    fn name(&self) -> &str {
        "transform_blank_lines"
    }

    fn description(&self) -> &str {
        "Collapse runs of two or more line breaks into a single BlankLine token"
    }

    fn transform(&self, tokens: Vec<Token>) -> Vec<Token> {
        transform_blank_lines(tokens)
    }
}

/// Collapse consecutive LineBreak tokens into BlankLine tokens
///
/// # Algorithm
///
/// 1. Iterate through the token stream
/// 2. On a LineBreak, extend the run over `Whitespace? LineBreak` pairs
/// 3. A run of one break is emitted as-is
/// 4. A run of 2+ breaks becomes one BlankLine whose text and span cover the whole run
/// 5. Whitespace after the last break (the next line's indentation) is not part of the run
///
/// # Example
///
/// Input tokens: `[Ident, LineBreak, Whitespace, LineBreak, Whitespace, Ident]`
/// Output tokens: `[Ident, BlankLine { breaks: 2 }, Whitespace, Ident]`
pub fn transform_blank_lines(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].kind != TokenKind::LineBreak {
            result.push(tokens[i].clone());
            i += 1;
            continue;
        }

        // `end` is one past the last LineBreak of the run
        let mut end = i + 1;
        let mut breaks = 1;
        loop {
            let mut next = end;
            if tokens.get(next).is_some_and(|t| t.kind == TokenKind::Whitespace) {
                next += 1;
            }
            if tokens.get(next).is_some_and(|t| t.kind == TokenKind::LineBreak) {
                breaks += 1;
                end = next + 1;
            } else {
                break;
            }
        }

        if breaks == 1 {
            result.push(tokens[i].clone());
        } else {
            let text: String = tokens[i..end].iter().map(|t| t.text.as_str()).collect();
            let span = tokens[i].span.start..tokens[end - 1].span.end;
            result.push(Token::new(TokenKind::BlankLine { breaks }, text, span));
        }
        i = end;
    }

    result
}
