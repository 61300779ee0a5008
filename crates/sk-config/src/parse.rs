//! Configuration file parsing.
//!
//! Parses individual `.sk.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use sk_query::Conjunction;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, OutputFormat};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Parse settings section.
    pub parse: Option<RawParseSettings>,
    /// Output settings section.
    pub output: Option<RawOutputSettings>,
}

/// Raw parse settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawParseSettings {
    /// Parse mode id.
    pub mode: Option<String>,
    /// Default conjunction.
    pub conjunction: Option<Conjunction>,
}

/// Raw output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawOutputSettings {
    /// Default output format.
    pub format: Option<OutputFormat>,
    /// Whether to colour terminal output.
    pub color: Option<bool>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.root.is_none());
        assert!(config.parse.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
root = true

[parse]
mode = "terms"
conjunction = "OR"

[output]
format = "json"
color = false
"#,
        )
        .unwrap();

        assert_eq!(config.root, Some(true));
        let parse = config.parse.unwrap();
        assert_eq!(parse.mode.as_deref(), Some("terms"));
        assert_eq!(parse.conjunction, Some(Conjunction::Or));
        let output = config.output.unwrap();
        assert_eq!(output.format, Some(OutputFormat::Json));
        assert_eq!(output.color, Some(false));
    }

    #[test]
    fn test_parse_lowercase_conjunction() {
        let config = parse_config("[parse]\nconjunction = \"or\"\n").unwrap();
        assert_eq!(config.parse.unwrap().conjunction, Some(Conjunction::Or));
    }

    #[test]
    fn test_parse_partial_section() {
        let config = parse_config("[parse]\nmode = \"phrase\"\n").unwrap();
        let parse = config.parse.unwrap();
        assert_eq!(parse.mode.as_deref(), Some("phrase"));
        assert!(parse.conjunction.is_none());
    }

    #[test]
    fn test_parse_invalid_conjunction() {
        assert!(parse_config("[parse]\nconjunction = \"XOR\"\n").is_err());
    }

    #[test]
    fn test_parse_unknown_key_rejected() {
        assert!(parse_config("[parse]\nmodes = \"terms\"\n").is_err());
    }

    #[test]
    fn test_parse_config_str_reports_path() {
        let err = parse_config_str("[parse", Path::new("/tmp/x/.sk.toml")).unwrap_err();
        assert!(err.to_string().contains("/tmp/x/.sk.toml"));
    }
}
