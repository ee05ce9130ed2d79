//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Add Steam games to a CSV backlog catalog", long_about = None)]
pub(crate) struct Cli {
    /// Catalog CSV file (overrides SHELF_CATALOG and the settings file)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Look up games by AppID or store URL and add them to the catalog
    ///
    /// With no arguments, prompts for one game per line until an empty line
    /// or end of input.
    Add {
        /// AppIDs or Steam store URLs
        inputs: Vec<String>,
    },

    /// Rewrite the catalog with canonical quoting
    Normalize {
        /// Write the result here instead of replacing the catalog
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage shelf settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where each value comes from
    Show,

    /// Print the settings file path
    Path,

    /// Write a settings file with the current resolved values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}
