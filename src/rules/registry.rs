//! Rule registry for rule discovery and selection
//!
//! Rules are registered under their name and looked up by name or alias. The order rules run in
//! is always the caller's, never the registry's.

use super::interface::Rule;
use super::scope_boundaries::{
    BlankLinesAtEndOfScope, BlankLinesAtStartOfScope, InsertBlankLinesAtScope,
};
use super::super_call::BlankLineAfterSuperCall;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule '{0}'")]
pub struct UnknownRuleError(pub String);

/// Registry of formatting rules
///
/// # Examples
///
/// ```ignore
/// let registry = RuleRegistry::with_defaults();
/// let rules = registry.resolve(&["insertBlankLinesAtScope"])?;
/// ```
pub struct RuleRegistry {
    rules: HashMap<String, Box<dyn Rule>>,
    aliases: HashMap<String, String>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        RuleRegistry {
            rules: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a rule. A rule with the same name is replaced.
    pub fn register<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.insert(rule.name().to_string(), Box::new(rule));
    }

    /// Make `alias` resolve to the rule registered as `name`.
    pub fn alias(&mut self, alias: &str, name: &str) {
        self.aliases.insert(alias.to_string(), name.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        let canonical = self.aliases.get(name).map_or(name, String::as_str);
        self.rules.get(canonical).map(|rule| rule.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered rules as `(name, description)`, sorted by name.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut rules: Vec<_> = self
            .rules
            .values()
            .map(|rule| (rule.name(), rule.description()))
            .collect();
        rules.sort();
        rules
    }

    /// Looks up every name, keeping the given order. Fails on the first unknown name.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&dyn Rule>, UnknownRuleError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.get(name)
                    .ok_or_else(|| UnknownRuleError(name.to_string()))
            })
            .collect()
    }

    /// Create a registry with the built-in rules
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(InsertBlankLinesAtScope);
        registry.register(BlankLineAfterSuperCall);
        registry.register(BlankLinesAtStartOfScope);
        registry.register(BlankLinesAtEndOfScope);
        registry.alias("addBlanklineBeforeSuper", "blankLineAfterSuperCall");

        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
