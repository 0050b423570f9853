//! as2as.toml configuration.

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when `--config` isn't given.
pub const DEFAULT_CONFIG_FILE: &str = "as2as.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub convert: Option<ConvertConfig>,
    pub rules: Option<RulesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub on_error: Option<FailurePolicy>,
    pub format: Option<OutputFormat>,
}

/// Timing stamped onto every emitted scaling rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    pub cool_down_secs: Option<i64>,
    pub breach_duration_secs: Option<i64>,
}

/// What to do with an app whose policy can't be converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing app.
    #[default]
    Abort,
    /// Log the failure and leave the app out of the output.
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] if it
    /// exists, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_or_default(explicit, Path::new(DEFAULT_CONFIG_FILE))
    }

    fn load_or_default(explicit: Option<&Path>, fallback: &Path) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if fallback.is_file() => Self::from_file(fallback),
            None => Ok(Self::default()),
        }
    }

    pub fn on_error(&self) -> Option<FailurePolicy> {
        self.convert.as_ref().and_then(|c| c.on_error)
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.convert.as_ref().and_then(|c| c.format)
    }

    pub fn cool_down_secs(&self) -> Option<i64> {
        self.rules.as_ref().and_then(|r| r.cool_down_secs)
    }

    pub fn breach_duration_secs(&self) -> Option<i64> {
        self.rules.as_ref().and_then(|r| r.breach_duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let toml_str = r#"
[convert]
on_error = "skip"
format = "text"

[rules]
cool_down_secs = 300
breach_duration_secs = 120
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.on_error(), Some(FailurePolicy::Skip));
        assert_eq!(config.format(), Some(OutputFormat::Text));
        assert_eq!(config.cool_down_secs(), Some(300));
        assert_eq!(config.breach_duration_secs(), Some(120));
    }

    #[test]
    fn test_parse_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.on_error(), None);
        assert_eq!(config.format(), None);
        assert_eq!(config.cool_down_secs(), None);
    }

    #[test]
    fn test_parse_partial_section() {
        let config: Config = toml::from_str("[rules]\ncool_down_secs = 60\n").unwrap();
        assert_eq!(config.cool_down_secs(), Some(60));
        assert_eq!(config.breach_duration_secs(), None);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(toml::from_str::<Config>("[convert]\non_error = \"retry\"\n").is_err());
    }

    #[test]
    fn test_missing_default_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(None, &dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert!(config.convert.is_none());
        assert!(config.rules.is_none());
    }

    #[test]
    fn test_default_file_is_read_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[convert]\nformat = \"text\"\n").unwrap();

        let config = Config::load_or_default(None, &path).unwrap();
        assert_eq!(config.format(), Some(OutputFormat::Text));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load_or_default(Some(&missing), &missing).unwrap_err();
        assert!(format!("{err:#}").contains("nope.toml"));
    }
}
