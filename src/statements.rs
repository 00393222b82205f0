//! Statement segmentation
//!
//!     Splits the interior of each scope into its top-level statements. A statement ends at a
//!     semicolon or at a line end that is not a continuation (see
//!     [ends_statement](crate::scoping::boundaries::ends_statement)). Child scopes are opaque:
//!     a nested body is part of the statement that contains it, and its own statements are
//!     listed under the child. Lines holding only comments produce no statement.

use crate::lexing::keywords::{CONTROL_STATEMENTS, DECLARATIONS};
use crate::lexing::{Token, TokenKind};
use crate::scoping::boundaries::{ends_statement, skip_declaration_prefix, top_level};
use crate::scoping::{ScopeId, ScopeKind, ScopeTree};
use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementKind {
    /// A call expression, possibly chained, optionally under `try` / `await`.
    Call { super_call: bool },
    Declaration,
    Control,
    Other,
}

/// A statement: first and last significant token, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub start: usize,
    pub end: usize,
    pub kind: StatementKind,
}

impl Statement {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end + 1
    }

    pub fn is_super_call(&self) -> bool {
        matches!(self.kind, StatementKind::Call { super_call: true })
    }

    /// Member invoked on `super`: `viewDidLoad` for `super.viewDidLoad()`.
    pub fn super_callee<'t>(&self, tokens: &'t [Token]) -> Option<&'t str> {
        if !self.is_super_call() {
            return None;
        }
        let top = top_level(tokens, self.range());
        let pos = skip_effects(tokens, &top, 0);
        super_member(tokens, &top[pos..]).map(|index| tokens[index].text.as_str())
    }
}

/// Statements of every scope in a tree, indexed by [ScopeId].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementIndex {
    statements: Vec<Vec<Statement>>,
}

impl StatementIndex {
    pub fn build(tokens: &[Token], tree: &ScopeTree) -> Self {
        let statements = tree
            .iter()
            .map(|(id, _)| segment(tokens, tree, id))
            .collect();
        StatementIndex { statements }
    }

    pub fn statements(&self, id: ScopeId) -> &[Statement] {
        self.statements.get(id.0).map_or(&[], Vec::as_slice)
    }

    pub fn first(&self, id: ScopeId) -> Option<&Statement> {
        self.statements(id).first()
    }

    pub fn last(&self, id: ScopeId) -> Option<&Statement> {
        self.statements(id).last()
    }

    pub fn is_first(&self, id: ScopeId, statement: &Statement) -> bool {
        self.first(id) == Some(statement)
    }

    pub fn is_last(&self, id: ScopeId, statement: &Statement) -> bool {
        self.last(id) == Some(statement)
    }

    /// Total statements across all scopes.
    pub fn total(&self) -> usize {
        self.statements.iter().map(Vec::len).sum()
    }
}

/// Top-level statements of one scope.
pub fn segment(tokens: &[Token], tree: &ScopeTree, id: ScopeId) -> Vec<Statement> {
    let scope = tree.get(id);
    let mut children = tree
        .children(id)
        .iter()
        .map(|&child| tree.get(child))
        .map(|child| (child.extent(), child.is_brace()))
        .peekable();

    let mut statements = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut depth = 0usize;
    let interior = scope.interior();
    let mut index = interior.start;
    if scope.kind == ScopeKind::ClosureBody {
        let limit = tree
            .children(id)
            .first()
            .map_or(interior.end, |&child| tree.get(child).extent().start);
        if let Some(signature_end) = closure_signature_end(tokens, interior.start..limit) {
            index = signature_end + 1;
        }
    }

    let mut flush = |current: &mut Option<(usize, usize)>| {
        if let Some((start, end)) = current.take() {
            statements.push(Statement {
                start,
                end,
                kind: classify_statement(tokens, start..end + 1, scope.kind),
            });
        }
    };

    while index < interior.end {
        // a closure in a case pattern lies inside its case's label
        while children.next_if(|(extent, _)| extent.start < index).is_some() {}
        if let Some((extent, is_brace)) = children.next_if(|(extent, _)| extent.start == index) {
            index = extent.end;
            // case regions own their label and statements
            if !is_brace {
                flush(&mut current);
                continue;
            }
            let last = extent
                .clone()
                .rev()
                .find(|&i| tokens[i].is_significant())
                .unwrap_or(extent.start);
            current = Some((current.map_or(extent.start, |(start, _)| start), last));
            continue;
        }

        let token = &tokens[index];
        if token.is_significant() {
            if token.opens_group() {
                depth += 1;
            } else if token.closes_group() {
                depth = depth.saturating_sub(1);
            }
            if depth == 0 && token.kind == TokenKind::Semicolon {
                flush(&mut current);
            } else {
                current = Some((current.map_or(index, |(start, _)| start), index));
            }
        } else if token.is_line_end() && depth == 0 && ends_statement(tokens, index) {
            flush(&mut current);
        }
        index += 1;
    }
    flush(&mut current);

    statements
}

/// Index of the `in` ending a closure signature such as `[weak self] (a, b) -> Int in`.
fn closure_signature_end(tokens: &[Token], range: Range<usize>) -> Option<usize> {
    let mut depth = 0usize;
    for index in range {
        let token = &tokens[index];
        if !token.is_significant() {
            continue;
        }
        if token.opens_group() {
            depth += 1;
            continue;
        }
        if token.closes_group() {
            depth = depth.saturating_sub(1);
            continue;
        }
        if depth > 0 {
            continue;
        }
        match token.kind {
            TokenKind::Keyword if token.text == "in" => return Some(index),
            TokenKind::Keyword if token.text == "throws" || token.text == "rethrows" => {}
            TokenKind::Identifier
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::Dot
            | TokenKind::Operator
            | TokenKind::Attribute => {}
            _ => return None,
        }
    }
    None
}

fn classify_statement(tokens: &[Token], range: Range<usize>, scope: ScopeKind) -> StatementKind {
    let top = top_level(tokens, range);
    let pos = skip_declaration_prefix(tokens, &top, 0);
    let Some(&first) = top.get(pos) else {
        return StatementKind::Other;
    };
    let token = &tokens[first];
    let word = token.text.as_str();

    match token.kind {
        TokenKind::Keyword if word == "case" => {
            if scope == ScopeKind::TypeDeclaration {
                StatementKind::Declaration
            } else {
                StatementKind::Control
            }
        }
        TokenKind::Keyword if DECLARATIONS.contains(word) => StatementKind::Declaration,
        TokenKind::Keyword if CONTROL_STATEMENTS.contains(word) => StatementKind::Control,
        TokenKind::Identifier
            if word == "actor"
                && top
                    .get(pos + 1)
                    .is_some_and(|&i| tokens[i].kind == TokenKind::Identifier) =>
        {
            StatementKind::Declaration
        }
        _ => call_kind(tokens, &top[pos..]),
    }
}

/// `try`, `try?`, `try!`, `await`
fn skip_effects(tokens: &[Token], top: &[usize], mut pos: usize) -> usize {
    while let Some(&index) = top.get(pos) {
        let token = &tokens[index];
        if token.is_keyword("try") {
            pos += 1;
            if top
                .get(pos)
                .is_some_and(|&i| tokens[i].is_operator("?") || tokens[i].is_operator("!"))
            {
                pos += 1;
            }
        } else if token.is_word("await") {
            pos += 1;
        } else {
            break;
        }
    }
    pos
}

/// `super . name (` or `super . name {`: index of `name`.
fn super_member(tokens: &[Token], top: &[usize]) -> Option<usize> {
    match top {
        [receiver, dot, member, call, ..]
            if tokens[*receiver].is_keyword("super")
                && tokens[*dot].kind == TokenKind::Dot
                && matches!(tokens[*member].kind, TokenKind::Identifier | TokenKind::Keyword)
                && matches!(tokens[*call].kind, TokenKind::OpenParen | TokenKind::OpenBrace) =>
        {
            Some(*member)
        }
        _ => None,
    }
}

/// A receiver followed by a chain of member accesses, subscripts, optional chaining and
/// at least one invocation. Anything else (assignment, binary operators) is Other.
fn call_kind(tokens: &[Token], top: &[usize]) -> StatementKind {
    let pos = skip_effects(tokens, top, 0);
    let Some(&head) = top.get(pos) else {
        return StatementKind::Other;
    };
    let receiver = &tokens[head];
    if receiver.kind != TokenKind::Identifier
        && !["self", "super", "Self"].iter().any(|w| receiver.is_keyword(w))
    {
        return StatementKind::Other;
    }
    let super_call = super_member(tokens, &top[pos..]).is_some();

    let mut invoked = false;
    let mut pos = pos + 1;
    while let Some(&index) = top.get(pos) {
        let token = &tokens[index];
        match token.kind {
            TokenKind::Dot => {
                let member = top.get(pos + 1).map(|&i| &tokens[i]);
                if !member.is_some_and(|m| {
                    matches!(
                        m.kind,
                        TokenKind::Identifier | TokenKind::Keyword | TokenKind::Number
                    )
                }) {
                    return StatementKind::Other;
                }
                pos += 2;
            }
            TokenKind::OpenParen | TokenKind::OpenBrace => {
                invoked = true;
                pos += 2;
            }
            TokenKind::OpenBracket => pos += 2,
            TokenKind::Operator if token.text == "?" || token.text == "!" => pos += 1,
            _ => return StatementKind::Other,
        }
    }

    if invoked {
        StatementKind::Call { super_call }
    } else {
        StatementKind::Other
    }
}
