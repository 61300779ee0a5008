//! Configuration system for sk.
//!
//! sk uses TOML configuration files named `.sk.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.sk.toml` files found,
//! then loading `~/.sk.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawOutputSettings, RawParseSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
use sk_query::{ComplexMode, Conjunction, ParseMode, ParseModeRegistry, QueryError};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sk.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// How keys are parsed.
    pub parse: ParseSettings,
    /// How results are displayed.
    pub output: OutputSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that were merged, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sk.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Instantiates the configured parse mode from `registry`.
    pub fn parse_mode(
        &self,
        registry: &ParseModeRegistry,
    ) -> Result<Box<dyn ParseMode>, QueryError> {
        self.parse.create_mode(registry)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self, registry: &ParseModeRegistry) -> Vec<ConfigWarning> {
        validate_config(self, registry)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            parse: &self.parse,
            output: &self.output,
        };
        // Every field is a plain string, bool or unit enum.
        toml::to_string_pretty(&serializable).unwrap_or_default()
    }
}

/// Settings that control how keys are parsed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Parse mode id.
    pub mode: String,
    /// Conjunction for terms written without an operator.
    pub conjunction: Conjunction,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            mode: ComplexMode::ID.to_string(),
            conjunction: Conjunction::And,
        }
    }
}

impl ParseSettings {
    /// Returns these settings with command-line overrides applied on top.
    pub fn with_overrides(&self, mode: Option<&str>, conjunction: Option<Conjunction>) -> Self {
        Self {
            mode: mode.unwrap_or(&self.mode).to_string(),
            conjunction: conjunction.unwrap_or(self.conjunction),
        }
    }

    /// Instantiates the selected parse mode from `registry`.
    pub fn create_mode(
        &self,
        registry: &ParseModeRegistry,
    ) -> Result<Box<dyn ParseMode>, QueryError> {
        registry.create(&self.mode, self.conjunction)
    }
}

/// How `sk parse` renders a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree.
    #[default]
    Tree,
    /// JSON as consumed by search backends.
    Json,
    /// Canonical keys string.
    Query,
}

/// Output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default output format.
    pub format: OutputFormat,
    /// Whether to colour terminal output.
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Tree,
            color: true,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Parse settings.
    parse: &'a ParseSettings,
    /// Output settings.
    output: &'a OutputSettings,
}
