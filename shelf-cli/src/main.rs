//! shelf CLI
//!
//! Look up Steam games and keep them in a CSV backlog catalog.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_lib::Overrides;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let overrides = Overrides {
        catalog_path: cli.catalog,
    };

    let result = match cli.command {
        Commands::Add { inputs } => commands::add::run_add(&overrides, inputs, cli.quiet),
        Commands::Normalize { output } => commands::normalize::run_normalize(&overrides, output),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&overrides),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(&overrides, force),
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Route `log` output to stdout.
///
/// Normal runs print bare messages at info level (warnings and errors keep a
/// level prefix). `--verbose` switches to debug with env_logger's timestamped
/// format; `--quiet` keeps warnings and errors only. `RUST_LOG` wins when set.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("shelf", level)
        .target(env_logger::Target::Stdout);

    if !verbose {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{}: {}",
                record.level().if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{}: {}",
                record.level().if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    builder.parse_default_env().init();
}

/// Print an empty line through the logger so `--quiet` suppresses it too.
pub(crate) fn log_blank() {
    log::info!("");
}
