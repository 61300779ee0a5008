//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::PathBuf;

use crate::{
    Config, OutputSettings, ParseSettings,
    parse::{RawConfig, RawOutputSettings, RawParseSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every scalar setting the first defined value
/// wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut parse = ParseSettings::default();
    let mut output = OutputSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.parse {
            apply_raw_parse(&mut parse, raw);
        }
        if let Some(ref raw) = parsed.config.output {
            apply_raw_output(&mut output, raw);
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(|p| p.to_path_buf());

    Config {
        parse,
        output,
        config_root,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    }
}

/// Applies raw parse settings to result, overwriting any present values.
fn apply_raw_parse(result: &mut ParseSettings, raw: &RawParseSettings) {
    if let Some(ref v) = raw.mode {
        result.mode = v.clone();
    }
    if let Some(v) = raw.conjunction {
        result.conjunction = v;
    }
}

/// Applies raw output settings to result.
fn apply_raw_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.format {
        result.format = v;
    }
    if let Some(v) = raw.color {
        result.color = v;
    }
}
