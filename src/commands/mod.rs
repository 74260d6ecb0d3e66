//! Subcommand implementations for the `checkbox-tree` binary

mod build;
mod input;
mod output;
mod show;
mod toggle;

pub use build::cmd_build;
pub use input::load_config;
pub use show::{cmd_show, ShowOptions};
pub use toggle::{cmd_toggle, Bulk};
