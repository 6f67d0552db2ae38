//! Configuration loading for statlab.
//!
//! Supports loading defaults from a TOML file, with sensible fallbacks for
//! all settings. CLI flags take precedence over anything loaded here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use statlab_core::stats::Tail;
use std::path::Path;

/// Top-level configuration for statlab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for the hypothesis tests themselves.
    pub test: TestConfig,
    /// Settings for report rendering.
    pub report: ReportConfig,
}

/// Default significance level and tail direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// Significance level used when a subcommand does not override it.
    pub alpha: f64,
    /// Tail direction used when a subcommand does not override it.
    pub tail: Tail,
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Whether terminal output uses colors.
    pub colors: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            tail: Tail::TwoSided,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { colors: true }
    }
}

/// Default configuration file name.
const DEFAULT_CONFIG_FILE: &str = ".statlab.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the default file (`.statlab.toml`) or use
    /// defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from the given path when it exists, otherwise fall back to
    /// defaults. Used for the `--config` flag, whose default value points at
    /// a file that may legitimately be absent.
    pub fn load_from(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.test.alpha, 0.05);
        assert_eq!(config.test.tail, Tail::TwoSided);
        assert!(config.report.colors);
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[test]
alpha = 0.01
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();

        // Overridden value
        assert_eq!(config.test.alpha, 0.01);

        // Default values
        assert_eq!(config.test.tail, Tail::TwoSided);
        assert!(config.report.colors);
    }

    #[test]
    fn test_load_full_config() {
        let toml_content = r#"
[test]
alpha = 0.10
tail = "right"

[report]
colors = false
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.test.alpha, 0.10);
        assert_eq!(config.test.tail, Tail::Right);
        assert!(!config.report.colors);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/.statlab.toml")).unwrap();
        assert_eq!(config.test.alpha, 0.05);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not valid toml {{{{").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.test.alpha, parsed.test.alpha);
        assert_eq!(config.test.tail, parsed.test.tail);
        assert_eq!(config.report.colors, parsed.report.colors);
    }
}
