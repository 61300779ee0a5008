//! Configuration file discovery.
//!
//! Discovers `.sk.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.sk.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".sk.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.sk.toml`) last.
/// Walking stops at a file with `root = true`, in which case the global file is skipped.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.sk.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    /// Drops the global config, which depends on the machine running the tests.
    fn local_only(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn test_discover_no_configs() {
        let test_dir = TestDir::new();
        let subdir = test_dir.create_dir("a/b/c");

        let configs = discover_config_files(&subdir);
        assert!(local_only(&configs).is_empty());
    }

    #[test]
    fn test_discover_multiple_configs_precedence_order() {
        let test_dir = TestDir::new();
        let root_config = test_dir.create_config("");
        let mid_config = test_dir.create_config("a/b");
        let leaf_config = test_dir.create_config("a/b/c/d");
        let working_dir = test_dir.create_dir("a/b/c/d/e");

        let configs = discover_config_files(&working_dir);

        assert_eq!(
            local_only(&configs),
            vec![&leaf_config, &mid_config, &root_config]
        );
    }

    #[test]
    fn test_discover_stops_at_root_config() {
        let test_dir = TestDir::new();
        test_dir.create_config("");
        let root = test_dir.create_root_config("a");
        let leaf = test_dir.create_config("a/b");

        let configs = discover_config_files(&test_dir.path().join("a/b"));

        // Global config is skipped too once a root config is found.
        assert_eq!(configs, vec![leaf, root]);
    }

    #[test]
    fn test_global_config_path_ends_with_filename() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with(CONFIG_FILENAME));
            assert!(is_global_config(&path));
        }
        assert!(!is_global_config(Path::new("/some/other/path/.sk.toml")));
    }
}
