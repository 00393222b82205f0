//! Blank line after a leading super call
//!
//!     An override that starts by calling its base implementation gets a blank line between
//!     that call and the rest of the body:
//!
//!         override func viewDidLoad() {
//!             super.viewDidLoad()
//!
//!             setUp()
//!         }
//!
//!     The call has to be the first statement and has to target the overridden member itself
//!     (`super.init(` inside `init`). Calls with more code after them on the same line are left
//!     alone.

use super::edges::line_end_following;
use super::interface::{Rule, RuleContext};
use crate::pipeline::edits::Edit;
use crate::scoping::{ScopeId, ScopeKind};
use crate::statements::Statement;

pub struct BlankLineAfterSuperCall;

impl Rule for BlankLineAfterSuperCall {
    fn name(&self) -> &str {
        "blankLineAfterSuperCall"
    }

    fn description(&self) -> &str {
        "Insert a blank line after a super call that opens an overriding function"
    }

    fn edits(&self, context: &RuleContext<'_>) -> Vec<Edit> {
        let tokens = context.tokens;
        context
            .scopes
            .of_kind(ScopeKind::FunctionBody)
            .filter_map(|(id, _)| leading_super_call(context, id))
            .filter_map(|statement| line_end_following(tokens, statement.end))
            .filter(|&index| !tokens[index].is_blank_line())
            .map(Edit::insert_blank_line)
            .collect()
    }
}

/// First statement of a function body when it calls the function's own base implementation.
pub(crate) fn leading_super_call<'c>(
    context: &RuleContext<'c>,
    id: ScopeId,
) -> Option<&'c Statement> {
    let scope = context.scopes.get(id);
    if scope.kind != ScopeKind::FunctionBody {
        return None;
    }
    let statement = context.statements.first(id)?;
    let callee = statement.super_callee(context.tokens)?;
    (scope.declared_name(context.tokens)? == callee).then_some(statement)
}
