//! Scope tracking
//!
//!     Turns the lexed token stream into a tree of classified scopes.
//!
//! Stages
//!
//!     1. Brace pairing. See [tracker]. Unbalanced input is an error; no partial tree is
//!        returned.
//!
//!     2. Classification. See [classifier]. The clause before each `{` decides the kind, using
//!        the line continuation rules in [boundaries].
//!
//!     3. Case regions. Switch bodies are split at their `case` / `default` labels into
//!        CaseBody scopes, which have no braces of their own.
//!
//!     The result is an arena ([ScopeTree]) in document order. Parents are indices, so the tree
//!     holds no references into the token stream and can be shared freely between rules.

pub mod boundaries;
pub mod classifier;
pub mod scope;
pub mod tracker;

pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};
pub use tracker::{build_scope_tree, UnbalancedScopeError};
