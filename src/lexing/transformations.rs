//! Token stream transformations
//!
//! A transformation is a pure function from a token stream to a token stream. They run after
//! base tokenization, in order, and must keep the stream lossless.

pub mod blank_lines;

pub use blank_lines::{transform_blank_lines, TransformBlankLines};

use crate::lexing::token::Token;

/// A transformation that processes a token stream
///
/// # Examples
///
/// ```ignore
/// struct MyTransformation;
///
/// impl Transformation for MyTransformation {
///     fn name(&self) -> &str {
///         "my_transformation"
///     }
///
///     fn description(&self) -> &str {
///         "Does something to tokens"
///     }
///
///     fn transform(&self, tokens: Vec<Token>) -> Vec<Token> {
///         tokens
///     }
/// }
/// ```
pub trait Transformation {
    /// Lowercase with underscores (e.g., "transform_blank_lines")
    fn name(&self) -> &str;

    /// Human-readable description of what this transformation does
    fn description(&self) -> &str;

    fn transform(&self, tokens: Vec<Token>) -> Vec<Token>;
}

/// The transformations [`lex`](crate::lexing::lex) applies, in order.
pub fn standard() -> Vec<Box<dyn Transformation>> {
    vec![Box::new(TransformBlankLines)]
}
