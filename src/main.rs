//! checkbox-tree CLI - inspect and exercise checkbox tree selections
//!
//! Usage: checkbox-tree <COMMAND>
//!
//! Commands:
//!   show    Render the tree with its checkbox states
//!   build   Resolve flat or mixed options into a nested tree
//!   toggle  Apply toggles and print the resulting selection

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::{Cli, Commands};
use commands::{Bulk, ShowOptions};

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "checkbox_tree=warn".into()),
        1 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Show {
            options,
            selected,
            search,
            ascii,
            json,
        } => commands::cmd_show(
            ShowOptions {
                options: &options,
                selected,
                search: search.as_deref(),
                ascii,
                json,
            },
            config,
        ),
        Commands::Build {
            options,
            parent_field,
        } => commands::cmd_build(&options, parent_field.as_deref(), &config),
        Commands::Toggle {
            options,
            selected,
            all,
            none,
            keys,
        } => {
            let bulk = if all {
                Some(Bulk::All)
            } else if none {
                Some(Bulk::None)
            } else {
                None
            };
            commands::cmd_toggle(&options, selected, bulk, &keys, config)
        }
    }
}
