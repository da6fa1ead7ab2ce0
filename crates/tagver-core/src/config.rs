//! `tagver.toml` configuration.
//!
//! Every key is optional; an absent file behaves like an empty one.
//!
//! ```toml
//! [describe]
//! tags = "annotated"
//!
//! [output]
//! format = "env"
//! prefix = "APP_VERSION"
//! ```

use crate::history::TagSelection;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for in the working directory and its parents.
pub const CONFIG_FILE: &str = "tagver.toml";

/// Default variable prefix for env and cargo output.
pub const DEFAULT_PREFIX: &str = "VERSION";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How HEAD is described.
    pub describe: DescribeConfig,
    /// How the result is printed.
    pub output: OutputConfig,
}

/// The `[describe]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DescribeConfig {
    /// Tags describe may anchor on.
    pub tags: TagSelection,
}

/// The `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format for `show`.
    pub format: OutputFormat,
    /// Variable prefix, e.g. `VERSION` gives `VERSION_CODE` and `VERSION_NAME`.
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or contains unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse tagver.toml")
    }

    /// Load and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content)
    }

    /// Find `tagver.toml` in `start` or the nearest ancestor that has one.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest `tagver.toml`, or the defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is found but cannot be read or parsed.
    pub fn discover(start: &Path) -> Result<Self> {
        match Self::find(start) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.describe.tags, TagSelection::All);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.output.prefix, "VERSION");
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::parse(
            r#"
            [describe]
            tags = "annotated"

            [output]
            format = "cargo"
            prefix = "APP_VERSION"
            "#,
        )
        .unwrap();
        assert_eq!(config.describe.tags, TagSelection::Annotated);
        assert_eq!(config.output.format, OutputFormat::Cargo);
        assert_eq!(config.output.prefix, "APP_VERSION");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = Config::parse("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.prefix, "VERSION");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Config::parse("[describe]\nmatch = \"v*\"\n").is_err());
        assert!(Config::parse("[packaging]\n").is_err());
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(Config::parse("[describe]\ntags = \"none\"\n").is_err());
        assert!(Config::parse("[output]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn find_walks_up_to_nearest_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(Config::find(&nested), None);

        std::fs::write(dir.path().join(CONFIG_FILE), "[output]\nprefix = \"TOP\"\n").unwrap();
        assert_eq!(Config::find(&nested), Some(dir.path().join(CONFIG_FILE)));
        assert_eq!(Config::discover(&nested).unwrap().output.prefix, "TOP");

        std::fs::write(nested.join(CONFIG_FILE), "[output]\nprefix = \"INNER\"\n").unwrap();
        assert_eq!(Config::discover(&nested).unwrap().output.prefix, "INNER");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
