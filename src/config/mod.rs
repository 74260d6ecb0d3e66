//! Configuration module for checkbox-tree
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CHECKBOX_TREE_*)
//! 3. Project config (.checkbox-tree.toml)
//! 4. User config (~/.config/checkbox-tree/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_or_default, load_with_warnings, with_env_overrides, ConfigWarning};
pub use types::{TreeConfig, DEFAULT_PARENT_KEY_FIELD, PROJECT_CONFIG_FILE};
