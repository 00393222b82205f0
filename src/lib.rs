//! # scopefmt
//!
//! A blank-line formatter for brace-scoped, Swift-like source.
//!
//! The source is lexed into a lossless token stream ([lexing]), braces are paired and
//! classified into a scope tree ([scoping]), each scope's interior is split into statements
//! ([statements]), and an ordered list of rules ([rules]) proposes edits that the driver
//! ([pipeline]) validates, merges and applies in one pass.
//!
//! ```ignore
//! let formatted = scopefmt::format(source, &["insertBlankLinesAtScope"])?;
//! if formatted.changed() {
//!     std::fs::write(path, formatted.output)?;
//! }
//! ```
//!
//! ## Testing
//!
//! Shared helpers for rule and formatter tests live in the [testing] module.

pub mod formats;
pub mod lexing;
pub mod pipeline;
pub mod rules;
pub mod scoping;
pub mod statements;
pub mod testing;

pub use pipeline::{format, Diagnostic, FormatConfig, FormatError, Formatted, Formatter};
pub use rules::{Rule, RuleRegistry};
