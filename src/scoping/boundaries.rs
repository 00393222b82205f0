//! Statement boundary heuristics
//!
//!     Line breaks end statements unless the line is visibly unfinished. The same test decides
//!     where a scope header starts and where the statements inside a scope split, so the
//!     tracker and the statement index agree on it.
//!
//!     A line continues into the next one when it ends in a comma, a dot, an open paren or
//!     bracket, an attribute, or a binary operator; or when the next line starts with a dot, an
//!     operator, an opening brace or one of `else`, `catch`, `where`, `throws`, `rethrows`.
//!     A colon never continues a line, so `case .a:` always ends its label.

use crate::lexing::keywords::{ACCESSORS, MODIFIERS};
use crate::lexing::{next_significant, prev_significant, Token, TokenKind};
use std::ops::Range;

const CONTINUATION_WORDS: &[&str] = &["else", "catch", "where", "throws", "rethrows"];

/// Whether the line end at `index` terminates the statement in front of it.
pub fn ends_statement(tokens: &[Token], index: usize) -> bool {
    let (Some(prev), Some(next)) = (
        prev_significant(tokens, index),
        next_significant(tokens, index),
    ) else {
        return true;
    };
    !(continues_after(tokens, prev) || continues_before(&tokens[next]))
}

fn continues_after(tokens: &[Token], index: usize) -> bool {
    let token = &tokens[index];
    match token.kind {
        TokenKind::Comma
        | TokenKind::Dot
        | TokenKind::OpenParen
        | TokenKind::OpenBracket
        | TokenKind::Attribute => true,
        // postfix `?`/`!` and closing generic brackets end expressions
        TokenKind::Operator => !token.text.chars().all(|c| matches!(c, '?' | '!' | '>')),
        TokenKind::CloseParen => closes_attribute_arguments(tokens, index),
        _ => false,
    }
}

fn continues_before(token: &Token) -> bool {
    match token.kind {
        TokenKind::Dot | TokenKind::OpenBrace => true,
        TokenKind::Operator => token.text != "!",
        TokenKind::Keyword => CONTINUATION_WORDS.contains(&token.text.as_str()),
        _ => false,
    }
}

/// `@available(iOS 13, *)` on its own line still belongs to the declaration below it.
fn closes_attribute_arguments(tokens: &[Token], close: usize) -> bool {
    matching_open(tokens, close)
        .and_then(|open| prev_significant(tokens, open))
        .is_some_and(|before| tokens[before].kind == TokenKind::Attribute)
}

fn matching_open(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for index in (0..=close).rev() {
        let token = &tokens[index];
        if token.closes_group() {
            depth += 1;
        } else if token.opens_group() {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Walks back from the `{` at `open` to the first token of the clause that introduced it.
///
/// Returns `None` when the brace sits inside an unclosed paren or bracket, which makes it a
/// closure argument. Groups are skipped whole, so braces inside `(...)` do not stop the walk.
pub fn header_start(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for index in (0..open).rev() {
        let token = &tokens[index];
        if token.closes_group() {
            depth += 1;
            continue;
        }
        if token.opens_group() {
            if depth == 0 {
                return None;
            }
            depth -= 1;
            continue;
        }
        if depth > 0 {
            continue;
        }
        match token.kind {
            TokenKind::OpenBrace | TokenKind::CloseBrace | TokenKind::Semicolon => {
                return Some(index + 1)
            }
            TokenKind::LineBreak | TokenKind::BlankLine { .. } if ends_statement(tokens, index) => {
                return Some(index + 1)
            }
            _ => {}
        }
    }
    Some(0)
}

/// Significant tokens of `range` at nesting depth zero.
///
/// The opening and closing tokens of a paren, bracket or brace group are kept as markers;
/// everything between them is dropped.
pub fn top_level(tokens: &[Token], range: Range<usize>) -> Vec<usize> {
    let mut result = Vec::new();
    let mut depth = 0usize;
    for index in range {
        let token = &tokens[index];
        if !token.is_significant() {
            continue;
        }
        if token.closes_group() || token.kind == TokenKind::CloseBrace {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                result.push(index);
            }
            continue;
        }
        if depth == 0 {
            result.push(index);
        }
        if token.opens_group() || token.kind == TokenKind::OpenBrace {
            depth += 1;
        }
    }
    result
}

/// Skips attributes and declaration modifiers at the front of `top`, returning the position
/// of the first token after them.
pub fn skip_declaration_prefix(tokens: &[Token], top: &[usize], mut pos: usize) -> usize {
    while let Some(&index) = top.get(pos) {
        if tokens[index].kind == TokenKind::Attribute {
            pos = skip_group(tokens, top, pos + 1);
        } else if is_modifier(tokens, top, pos) {
            pos = skip_group(tokens, top, pos + 1);
        } else {
            break;
        }
    }
    pos
}

/// Skips an argument group (`(...)`) starting at `pos`, if there is one.
fn skip_group(tokens: &[Token], top: &[usize], pos: usize) -> usize {
    let opens = top
        .get(pos)
        .is_some_and(|&index| tokens[index].kind == TokenKind::OpenParen);
    let closed = top
        .get(pos + 1)
        .is_some_and(|&index| tokens[index].kind == TokenKind::CloseParen);
    match (opens, closed) {
        (true, true) => pos + 2,
        (true, false) => pos + 1,
        _ => pos,
    }
}

fn is_modifier(tokens: &[Token], top: &[usize], pos: usize) -> bool {
    let token = &tokens[top[pos]];
    if !matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword) {
        return false;
    }
    let class = token.is_keyword("class");
    if !class && !MODIFIERS.contains(token.text.as_str()) {
        return false;
    }

    let Some(&next_index) = top.get(pos + 1) else {
        return false;
    };
    let next = &tokens[next_index];
    match next.kind {
        TokenKind::Keyword | TokenKind::Attribute => true,
        TokenKind::OpenParen => !class && has_modifier_argument(tokens, next_index),
        TokenKind::Identifier => {
            !class
                && (MODIFIERS.contains(next.text.as_str())
                    || ACCESSORS.contains(next.text.as_str())
                    || next.text == "actor")
        }
        _ => false,
    }
}

/// `private(set)`, `unowned(safe)`
fn has_modifier_argument(tokens: &[Token], open: usize) -> bool {
    next_significant(tokens, open)
        .is_some_and(|index| ["set", "safe", "unsafe"].contains(&tokens[index].text.as_str()))
}
