use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_lib::{Overrides, Settings};

use crate::CliError;

/// Rewrite the configured catalog with canonical quoting.
pub(crate) fn run_normalize(overrides: &Overrides, output: Option<PathBuf>) -> Result<(), CliError> {
    let (settings, _) = Settings::load(overrides)?;
    let input = settings.catalog_path;
    if !input.exists() {
        return Err(CliError::config(format!(
            "Catalog {} does not exist",
            input.display()
        )));
    }
    let output = output.unwrap_or_else(|| input.clone());

    let report = shelf_catalog::normalize(&input, &output)?;

    log::info!(
        "{} Normalized {} rows into {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.rows,
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if report.repaired > 0 {
        log::info!(
            "  {} rows had extra columns merged into tags",
            report.repaired.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if report.passthrough > 0 {
        log::info!(
            "  {} rows had fewer than five columns and were copied as-is",
            report.passthrough.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if report.skipped > 0 {
        log::info!(
            "  {} lines had an unbalanced quote and were left unchanged",
            report.skipped.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    Ok(())
}
