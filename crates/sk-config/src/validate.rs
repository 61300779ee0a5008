//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use sk_query::ParseModeRegistry;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The configured parse mode is not registered.
    UnknownParseMode {
        /// The configured mode id.
        mode: String,
        /// Ids of the modes that are available.
        available: Vec<String>,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParseMode { mode, available } => write!(
                f,
                "unknown parse mode '{mode}' (available: {})",
                available.join(", ")
            ),
        }
    }
}

/// Validates the configuration against a parse-mode registry.
pub fn validate_config(config: &Config, registry: &ParseModeRegistry) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if !registry.contains(&config.parse.mode) {
        warnings.push(ConfigWarning::UnknownParseMode {
            mode: config.parse.mode.clone(),
            available: registry.ids().into_iter().map(String::from).collect(),
        });
    }

    warnings
}
