//! Formatting pipeline
//!
//! - [executor]: drives lexing, analysis, rules and edit application (`Formatter`)
//! - [edits]: edit model, validation and application
//! - [config]: rule selection, layered over built-in defaults with the `config` crate

pub mod config;
pub mod edits;
pub mod executor;

pub use self::config::{ConfigError, FormatConfig, Loader};
pub use edits::{Edit, EditBatch, EditOperation, EditViolation, InternalError};
pub use executor::{format, Analysis, Diagnostic, FormatError, Formatted, Formatter};
