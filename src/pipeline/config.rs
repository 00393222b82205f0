//! Formatting configuration
//!
//! `defaults/scopefmt.default.yaml` is embedded so the documented defaults and the runtime
//! defaults cannot drift apart. [`Loader`] layers user files and command line overrides on top
//! of it before deserializing into [`FormatConfig`]; later layers replace earlier ones key by key.
//!
//! Files are YAML unless their extension is `.json`:
//!
//! ```yaml
//! rules:
//!   - insertBlankLinesAtScope
//!   - blankLineAfterSuperCall
//! ```

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

const DEFAULT_YAML: &str = include_str!("../../defaults/scopefmt.default.yaml");

/// Rule names in the order they run. Names are resolved against the registry when formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    pub rules: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            rules: vec![
                "insertBlankLinesAtScope".to_string(),
                "blankLineAfterSuperCall".to_string(),
            ],
        }
    }
}

impl FormatConfig {
    /// Parse a YAML document layered over the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Loader::new().with_str(text, FileFormat::Yaml).build()
    }

    /// Parse a JSON document layered over the defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Loader::new().with_str(text, FileFormat::Json).build()
    }
}

/// A configuration source could not be read, parsed or deserialized.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ConfigError(#[from] ::config::ConfigError);

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_YAML, FileFormat::Yaml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    /// Layer an in-memory document.
    pub fn with_str(mut self, text: &str, format: FileFormat) -> Self {
        self.builder = self.builder.add_source(File::from_str(text, format));
        self
    }

    /// Override an arbitrary configuration key.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Replace the rule list (useful for `--rules` on the command line).
    pub fn with_rules<I, S>(self, rules: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules: Vec<String> = rules.into_iter().map(Into::into).collect();
        self.set_override("rules", rules)
    }

    /// Deserialize the merged configuration.
    pub fn build(self) -> Result<FormatConfig, ConfigError> {
        let config: FormatConfig = self.builder.build()?.try_deserialize()?;
        tracing::debug!(rules = ?config.rules, "loaded configuration");
        Ok(config)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let format = if path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
        {
            FileFormat::Json
        } else {
            FileFormat::Yaml
        };
        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(required));
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FormatConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().unwrap();
        assert_eq!(config, FormatConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .with_rules(["blankLinesAtEndOfScope", "blankLineAfterSuperCall"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            config.rules,
            vec!["blankLinesAtEndOfScope", "blankLineAfterSuperCall"]
        );
    }

    #[test]
    fn parses_yaml_and_json() {
        let yaml = FormatConfig::from_yaml_str("rules:\n  - blankLineAfterSuperCall\n").unwrap();
        assert_eq!(yaml.rules, vec!["blankLineAfterSuperCall"]);

        let json = FormatConfig::from_json_str(r#"{"rules": ["insertBlankLinesAtScope"]}"#).unwrap();
        assert_eq!(json.rules, vec!["insertBlankLinesAtScope"]);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config = FormatConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, FormatConfig::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(FormatConfig::from_yaml_str("rulez:\n  - a\n").is_err());
    }

    #[test]
    fn layers_files_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("scopefmt.json");
        fs::write(&json, r#"{"rules": ["blankLinesAtStartOfScope"]}"#).unwrap();
        let yaml = dir.path().join("scopefmt.yaml");
        fs::write(&yaml, "rules:\n  - blankLinesAtEndOfScope\n").unwrap();

        let config = Loader::new()
            .with_optional_file(dir.path().join("absent.yaml"))
            .with_file(&json)
            .build()
            .unwrap();
        assert_eq!(config.rules, vec!["blankLinesAtStartOfScope"]);

        let config = Loader::new()
            .with_file(&json)
            .with_file(&yaml)
            .build()
            .unwrap();
        assert_eq!(config.rules, vec!["blankLinesAtEndOfScope"]);

        let config = Loader::new()
            .with_file(&yaml)
            .with_rules(["insertBlankLinesAtScope"])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.rules, vec!["insertBlankLinesAtScope"]);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/scopefmt.yaml").build();
        assert!(result.is_err());

        let result = Loader::new()
            .with_optional_file("/nonexistent/scopefmt.yaml")
            .build();
        assert_eq!(result.unwrap(), FormatConfig::default());
    }
}
