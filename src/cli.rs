//! CLI Argument Parsing
//!
//! Global flags (--config, --verbose) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// checkbox-tree - inspect and exercise checkbox tree selections
#[derive(Parser, Debug)]
#[command(name = "checkbox-tree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to .checkbox-tree.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the tree with its checkbox states
    Show {
        /// Options document (JSON object)
        #[arg(short, long)]
        options: PathBuf,

        /// Initially selected keys (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        selected: Vec<String>,

        /// Search query (requires a searchable config)
        #[arg(long)]
        search: Option<String>,

        /// Use ASCII icons
        #[arg(long)]
        ascii: bool,

        /// Print the row model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve flat or mixed options into a nested tree
    Build {
        /// Options document (JSON object)
        #[arg(short, long)]
        options: PathBuf,

        /// Field naming each item's parent
        #[arg(long)]
        parent_field: Option<String>,
    },

    /// Apply toggles and print the resulting selection
    Toggle {
        /// Options document (JSON object)
        #[arg(short, long)]
        options: PathBuf,

        /// Initially selected keys (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        selected: Vec<String>,

        /// Select everything first (requires bulk_toggleable)
        #[arg(long, conflicts_with = "none")]
        all: bool,

        /// Deselect everything first (requires bulk_toggleable)
        #[arg(long)]
        none: bool,

        /// Keys to toggle, in order
        keys: Vec<String>,
    },
}
