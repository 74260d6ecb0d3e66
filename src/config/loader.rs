//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{TreeError, TreeResult};

use super::types::{TreeConfig, PROJECT_CONFIG_FILE};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> TreeResult<(TreeConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: TreeConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| TreeError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> TreeConfig {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(dirs_config_dir().map(|dir| dir.join("checkbox-tree/config.toml")));

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => {
                for warning in &warnings {
                    warn!(
                        key = %warning.key,
                        file = %warning.file.display(),
                        suggestion = warning.suggestion.as_deref().unwrap_or(""),
                        "unknown configuration key"
                    );
                }
                debug!(file = %path.display(), "loaded configuration");
                return with_env_overrides(config);
            }
            Err(err) => warn!(file = %path.display(), error = %err, "ignoring configuration"),
        }
    }

    with_env_overrides(TreeConfig::default())
}

/// Apply environment variable overrides (CHECKBOX_TREE_* prefix)
pub fn with_env_overrides(config: TreeConfig) -> TreeConfig {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Booleans: anything other than "false" or "0" switches the flag on
fn flag(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

pub(crate) fn apply_overrides<F>(mut config: TreeConfig, lookup: F) -> TreeConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("CHECKBOX_TREE_SEARCHABLE") {
        config.searchable = flag(&val);
    }

    if let Some(val) = lookup("CHECKBOX_TREE_COLLAPSIBLE") {
        config.collapsible = flag(&val);
    }

    if let Some(val) = lookup("CHECKBOX_TREE_DEFAULT_COLLAPSED") {
        config.default_collapsed = flag(&val);
        config.default_expanded = None;
    }

    if let Some(val) = lookup("CHECKBOX_TREE_BULK_TOGGLEABLE") {
        config.bulk_toggleable = flag(&val);
    }

    if let Some(val) = lookup("CHECKBOX_TREE_STORE_PARENT_KEYS") {
        config.store_parent_keys = flag(&val);
    }

    // Naming a parent field implies flat options
    if let Some(field) = lookup("CHECKBOX_TREE_PARENT_KEY_FIELD") {
        let field = field.trim();
        if !field.is_empty() {
            config.parent_key_field = field.to_string();
            config.hierarchical = true;
        }
    }

    if let Some(val) = lookup("CHECKBOX_TREE_HIERARCHICAL") {
        config.hierarchical = flag(&val);
    }

    config
}

/// Get XDG config directory
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "searchable",
        "collapsible",
        "expandable",
        "default_collapsed",
        "default_expanded",
        "bulk_toggleable",
        "store_parent_keys",
        "hierarchical",
        "parent_key_field",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
