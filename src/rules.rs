//! Formatting rules
//!
//!     Each rule is an independent, pure function from the analyzed source (tokens, scope tree,
//!     statement index) to a list of edits. See [interface] for the trait and [registry] for
//!     lookup by name.
//!
//! Built-in rules
//!
//!     - `insertBlankLinesAtScope`: blank line after `{` and before `}` of type bodies.
//!     - `blankLineAfterSuperCall` (alias `addBlanklineBeforeSuper`): blank line after a super
//!       call that opens an overriding function.
//!     - `blankLinesAtStartOfScope` / `blankLinesAtEndOfScope`: remove blank lines at the
//!       boundaries of function, closure, control flow, switch, protocol and accessor bodies.

pub mod edges;
pub mod interface;
pub mod registry;
pub mod scope_boundaries;
pub mod super_call;

pub use interface::{Rule, RuleContext};
pub use registry::{RuleRegistry, UnknownRuleError};
pub use scope_boundaries::{BlankLinesAtEndOfScope, BlankLinesAtStartOfScope, InsertBlankLinesAtScope};
pub use super_call::BlankLineAfterSuperCall;
