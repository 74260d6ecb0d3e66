//! Loading options documents and configuration for subcommands

use std::path::Path;

use anyhow::{Context, Result};
use checkbox_tree::config::{load_with_warnings, with_env_overrides};
use checkbox_tree::{read_options, TreeConfig};
use serde_json::{Map, Value};

use super::output::print_config_warnings;

/// Explicit `--config` file, or the project/user/default lookup
pub fn load_config(path: Option<&Path>) -> Result<TreeConfig> {
    match path {
        Some(path) => {
            let (config, warnings) = load_with_warnings(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            print_config_warnings(path, &warnings);
            Ok(with_env_overrides(config))
        }
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            Ok(TreeConfig::load_or_default(Some(&cwd)))
        }
    }
}

pub fn load_options(path: &Path) -> Result<Map<String, Value>> {
    read_options(path).with_context(|| format!("failed to read options {}", path.display()))
}
