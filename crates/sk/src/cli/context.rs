//! Shared context for running CLI commands.

use std::{
    env,
    io::{self, IsTerminal, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use sk_config::{Config, ParseSettings};
use sk_query::{ParseMode, ParseModeRegistry};

use crate::cli::{
    args::{KeysInput, ParseOptions},
    output::report_query_error,
};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Parse modes available to commands.
    pub registry: ParseModeRegistry,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            registry: ParseModeRegistry::default(),
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init` and `check`, which must work even when an existing config file is
    /// invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            registry: ParseModeRegistry::default(),
        })
    }

    /// Returns the configured parse settings with CLI overrides applied.
    pub fn parse_settings(&self, options: &ParseOptions) -> ParseSettings {
        self.config
            .parse
            .with_overrides(options.mode.as_deref(), options.conjunction)
    }

    /// Instantiates the parse mode selected by CLI overrides and configuration.
    pub fn parse_mode(&self, options: &ParseOptions) -> Result<Box<dyn ParseMode>, ExitCode> {
        self.parse_settings(options)
            .create_mode(&self.registry)
            .map_err(|e| {
                report_query_error(&e);
                ExitCode::FAILURE
            })
    }

    /// Returns true if output to stdout should be coloured.
    pub fn color(&self) -> bool {
        self.config.output.color
            && env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal()
    }
}

/// Collects raw keys from the command line or standard input.
pub fn read_keys(input: &KeysInput) -> Result<Vec<u8>, ExitCode> {
    if !input.stdin {
        return Ok(input.keys.join(" ").into_bytes());
    }

    let mut keys = Vec::new();
    io::stdin().read_to_end(&mut keys).map_err(|e| {
        eprintln!("error: failed to read standard input: {e}");
        ExitCode::FAILURE
    })?;
    Ok(keys)
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
