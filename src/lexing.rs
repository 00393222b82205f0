//! Lexer
//!
//!     This module turns source text into the token stream every later stage works on.
//!
//! The Lexing Pipeline
//!
//!     1. Core tokenization using the logos lexer. See [base_tokenization](base_tokenization).
//!        Each line break is its own LineBreak token; literals and comments are scanned whole,
//!        so braces inside them never reach the scope tracker.
//!
//!     2. Blank line transformation. See [blank_lines](transformations::blank_lines).
//!        Runs of two or more line breaks become a single BlankLine token carrying the count.
//!
//! Losslessness
//!
//!     Every token keeps its source text and byte range. Rendering the tokens back (see
//!     [render]) must reproduce the input exactly; the formatter depends on it to guarantee that
//!     input without eligible edits comes out byte for byte unchanged.

pub mod base_tokenization;
pub mod common;
pub mod keywords;
pub mod token;
pub mod transformations;

pub use base_tokenization::tokenize;
pub use common::{SourcePosition, TokenizationError, TokenizationErrorKind};
pub use token::{next_significant, prev_significant, render, Token, TokenKind};

/// Tokenize and run the standard transformations.
pub fn lex(source: &str) -> Result<Vec<Token>, TokenizationError> {
    let tokens = tokenize(source)?;
    let tokens = transformations::standard()
        .iter()
        .fold(tokens, |tokens, transformation| {
            transformation.transform(tokens)
        });
    tracing::debug!(tokens = tokens.len(), "lexed source");
    Ok(tokens)
}
