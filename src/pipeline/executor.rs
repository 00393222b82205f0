//! Formatter driver: lex, analyze, run rules, apply edits, render

use crate::lexing::{lex, render, Token, TokenizationError};
use crate::pipeline::config::FormatConfig;
use crate::pipeline::edits::{validate, EditBatch, InternalError};
use crate::rules::{RuleContext, RuleRegistry, UnknownRuleError};
use crate::scoping::{build_scope_tree, ScopeTree, UnbalancedScopeError};
use crate::statements::StatementIndex;
use serde::Serialize;
use thiserror::Error;

/// Errors that stop formatting. No output is produced.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Tokenization(#[from] TokenizationError),
    #[error(transparent)]
    UnbalancedScope(#[from] UnbalancedScopeError),
    #[error(transparent)]
    UnknownRule(#[from] UnknownRuleError),
}

/// A non-fatal problem: a rule whose edits were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: String,
    pub message: String,
}

impl From<InternalError> for Diagnostic {
    fn from(error: InternalError) -> Self {
        Diagnostic {
            message: error.to_string(),
            rule: error.rule,
        }
    }
}

/// Output of a formatting run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formatted {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
    pub edits_applied: usize,
}

impl Formatted {
    /// Every edit rewrites or adds line-break text, so any applied edit changes the output.
    pub fn changed(&self) -> bool {
        self.edits_applied > 0
    }
}

/// Tokens and the structure derived from them.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub scopes: ScopeTree,
    pub statements: StatementIndex,
}

impl Analysis {
    pub fn context(&self) -> RuleContext<'_> {
        RuleContext {
            tokens: &self.tokens,
            scopes: &self.scopes,
            statements: &self.statements,
        }
    }
}

/// Runs named rules from a registry over source text
pub struct Formatter {
    registry: RuleRegistry,
}

impl Formatter {
    /// Create a formatter with the built-in rules
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_defaults())
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Lex the source and build its scope tree and statement index.
    pub fn analyze(&self, source: &str) -> Result<Analysis, FormatError> {
        let tokens = lex(source)?;
        let scopes = build_scope_tree(&tokens)?;
        let statements = StatementIndex::build(&tokens, &scopes);
        tracing::debug!(statements = statements.total(), "segmented statements");
        Ok(Analysis {
            tokens,
            scopes,
            statements,
        })
    }

    /// Run `rules`, in order, over `source`.
    ///
    /// Rule names are resolved before anything is lexed. A rule whose edits fail validation is
    /// dropped with a diagnostic; the other rules still apply.
    pub fn format<S: AsRef<str>>(&self, source: &str, rules: &[S]) -> Result<Formatted, FormatError> {
        let rules = self.registry.resolve(rules)?;
        let _span = tracing::debug_span!("format", bytes = source.len(), rules = rules.len()).entered();

        let analysis = self.analyze(source)?;
        let context = analysis.context();
        let mut batch = EditBatch::new();
        let mut diagnostics = Vec::new();

        for rule in rules {
            let proposed = rule.edits(&context);
            let merged = validate(proposed, &analysis.tokens)
                .and_then(|edits| batch.merge(&edits).map(|()| edits.len()));
            match merged {
                Ok(count) => tracing::debug!(rule = rule.name(), edits = count, "accepted edits"),
                Err(violation) => {
                    let error = InternalError {
                        rule: rule.name().to_string(),
                        violation,
                    };
                    tracing::warn!(rule = rule.name(), %error, "dropped rule edits");
                    diagnostics.push(Diagnostic::from(error));
                }
            }
        }

        let edits_applied = batch.len();
        let tokens = batch.apply(analysis.tokens);
        Ok(Formatted {
            output: render(&tokens),
            diagnostics,
            edits_applied,
        })
    }

    pub fn format_with_config(
        &self,
        source: &str,
        config: &FormatConfig,
    ) -> Result<Formatted, FormatError> {
        self.format(source, &config.rules)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format `source` with the built-in rules named in `rules`.
pub fn format(source: &str, rules: &[&str]) -> Result<Formatted, FormatError> {
    Formatter::new().format(source, rules)
}
