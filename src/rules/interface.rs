//! Rule interface
//!
//! A rule reads the token stream and its analysis and proposes edits. Rules never mutate
//! anything themselves; the executor validates, merges and applies what they return.

use crate::lexing::Token;
use crate::pipeline::edits::Edit;
use crate::scoping::ScopeTree;
use crate::statements::StatementIndex;

/// Everything a rule can look at. All positions refer to the pre-edit token stream.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub tokens: &'a [Token],
    pub scopes: &'a ScopeTree,
    pub statements: &'a StatementIndex,
}

/// A formatting rule
///
/// # Examples
///
/// ```ignore
/// struct NoOp;
///
/// impl Rule for NoOp {
///     fn name(&self) -> &str {
///         "noOp"
///     }
///
///     fn description(&self) -> &str {
///         "Proposes nothing"
///     }
///
///     fn edits(&self, _context: &RuleContext<'_>) -> Vec<Edit> {
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// lowerCamelCase, as used in configuration files
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Must be pure and return nothing when run on its own output.
    fn edits(&self, context: &RuleContext<'_>) -> Vec<Edit>;
}
