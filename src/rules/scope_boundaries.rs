//! Blank lines at scope boundaries
//!
//!     Type bodies get a blank line after their opening brace and before their closing brace.
//!     Every other body kind that can be edited has such blank lines removed. The two sides
//!     never touch the same scope, so the rules can run together in any order.
//!
//!     Each edge of a type body is handled on its own. A line break next to the brace is
//!     promoted to a blank line; when the brace shares its line with content, as in
//!     `struct A { var a = 1 }`, a blank line is spliced in between. An empty `{}` gets a single
//!     blank line that serves as both edges.

use super::edges::{line_end_following, line_end_preceding};
use super::interface::{Rule, RuleContext};
use super::super_call::leading_super_call;
use crate::lexing::{Token, TokenKind};
use crate::pipeline::edits::Edit;
use crate::scoping::{Scope, ScopeId, ScopeKind, ScopeTree};

/// Inserts blank lines at the start and end of type bodies.
pub struct InsertBlankLinesAtScope;

impl Rule for InsertBlankLinesAtScope {
    fn name(&self) -> &str {
        "insertBlankLinesAtScope"
    }

    fn description(&self) -> &str {
        "Insert a blank line after the opening and before the closing brace of type declarations"
    }

    fn edits(&self, context: &RuleContext<'_>) -> Vec<Edit> {
        let tokens = context.tokens;
        let mut edits = Vec::new();

        // for `{\n}` and `{}` both edges produce the same edit; the executor collapses the pair
        for (_, scope) in context.scopes.of_kind(ScopeKind::TypeDeclaration) {
            edits.extend(opening_edge(tokens, scope));
            edits.extend(closing_edge(tokens, scope));
        }

        edits
    }
}

fn opening_edge(tokens: &[Token], scope: &Scope) -> Option<Edit> {
    match line_end_following(tokens, scope.open) {
        Some(index) if tokens[index].is_blank_line() => None,
        Some(index) => Some(Edit::insert_blank_line(index)),
        None => Some(Edit::insert_blank_line_before(scope.open + 1)),
    }
}

/// Spliced blank lines go in front of the whitespace before `}`, which becomes its indent.
fn closing_edge(tokens: &[Token], scope: &Scope) -> Option<Edit> {
    match line_end_preceding(tokens, scope.close) {
        Some(index) if tokens[index].is_blank_line() => None,
        Some(index) => Some(Edit::insert_blank_line(index)),
        None if scope.close > 0 && tokens[scope.close - 1].kind == TokenKind::Whitespace => {
            Some(Edit::insert_blank_line_before(scope.close - 1))
        }
        None => Some(Edit::insert_blank_line_before(scope.close)),
    }
}

/// Removes blank lines directly after the opening brace of executable and declaration-only
/// bodies.
pub struct BlankLinesAtStartOfScope;

impl Rule for BlankLinesAtStartOfScope {
    fn name(&self) -> &str {
        "blankLinesAtStartOfScope"
    }

    fn description(&self) -> &str {
        "Remove blank lines at the start of function, closure, control flow and protocol bodies"
    }

    fn edits(&self, context: &RuleContext<'_>) -> Vec<Edit> {
        trimmed_scopes(context.scopes)
            .filter_map(|(_, scope)| line_end_following(context.tokens, scope.open))
            .filter(|&index| context.tokens[index].is_blank_line())
            .map(Edit::remove_blank_line)
            .collect()
    }
}

/// Removes blank lines directly before the closing brace of executable and declaration-only
/// bodies.
pub struct BlankLinesAtEndOfScope;

impl Rule for BlankLinesAtEndOfScope {
    fn name(&self) -> &str {
        "blankLinesAtEndOfScope"
    }

    fn description(&self) -> &str {
        "Remove blank lines at the end of function, closure, control flow and protocol bodies"
    }

    fn edits(&self, context: &RuleContext<'_>) -> Vec<Edit> {
        trimmed_scopes(context.scopes)
            .filter(|&(id, _)| !ends_with_leading_super_call(context, id))
            .filter_map(|(_, scope)| line_end_preceding(context.tokens, scope.close))
            .filter(|&index| context.tokens[index].is_blank_line())
            .map(Edit::remove_blank_line)
            .collect()
    }
}

/// Brace bodies other than type declarations whose kind is known. Case regions have no
/// braces of their own, and Other is never edited.
fn trimmed_scopes(scopes: &ScopeTree) -> impl Iterator<Item = (ScopeId, &Scope)> {
    scopes.iter().filter(|(_, scope)| {
        scope.kind.is_declaration_only() || (scope.kind.is_executable() && scope.is_brace())
    })
}

/// The blank line after a lone super call belongs to `blankLineAfterSuperCall`.
fn ends_with_leading_super_call(context: &RuleContext<'_>, id: ScopeId) -> bool {
    leading_super_call(context, id)
        .is_some_and(|statement| context.statements.is_last(id, statement))
}
