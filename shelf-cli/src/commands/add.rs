use std::io::{self, BufRead, Write};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_core::MetadataSource;
use shelf_lib::{IngestError, IngestOutcome, Ingestor, Overrides, Settings, steam_ingestor};

use crate::CliError;

const PROMPT: &str = "Enter Steam game URL or AppID: ";

/// Run the add command.
///
/// Every input is an independent attempt; a failure is reported and the
/// next input is processed. In argument mode the command fails if any
/// attempt failed.
pub(crate) fn run_add(overrides: &Overrides, inputs: Vec<String>, quiet: bool) -> Result<(), CliError> {
    let (settings, _) = Settings::load(overrides)?;
    log::debug!("Catalog: {}", settings.catalog_path.display());

    let mut ingestor = steam_ingestor(&settings)?;

    if inputs.is_empty() {
        return run_interactive(&mut ingestor, quiet);
    }

    let failures = inputs
        .iter()
        .filter(|input| !ingest_one(&mut ingestor, input, quiet))
        .count();

    if failures > 0 {
        return Err(CliError::other(format!(
            "{failures} of {} games could not be added",
            inputs.len()
        )));
    }
    Ok(())
}

/// Prompt for one input per line until an empty line or EOF.
fn run_interactive<S: MetadataSource>(
    ingestor: &mut Ingestor<S>,
    quiet: bool,
) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            break;
        }
        ingest_one(ingestor, input, quiet);
    }
    Ok(())
}

/// Ingest a single input and print one line describing the outcome.
/// Returns false if the attempt failed.
fn ingest_one<S: MetadataSource>(ingestor: &mut Ingestor<S>, input: &str, quiet: bool) -> bool {
    let pb = fetch_spinner(quiet, input);
    let result = ingestor.ingest(input);
    pb.finish_and_clear();

    let catalog = ingestor.writer().path();
    match result {
        Ok(IngestOutcome::Added(record)) => {
            log::info!(
                "{} Added {} to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                record.title.if_supports_color(Stdout, |t| t.bold()),
                display_path(catalog).if_supports_color(Stdout, |t| t.cyan()),
            );
            if !record.tags.is_empty() {
                log::debug!("  Tags: {}", record.tags.join(", "));
            }
            true
        }
        Ok(IngestOutcome::Duplicate(id)) => {
            log::info!(
                "{} AppID {} is already in {}, skipping",
                "\u{2013}".if_supports_color(Stdout, |t| t.dimmed()),
                id,
                display_path(catalog).if_supports_color(Stdout, |t| t.cyan()),
            );
            true
        }
        Err(e @ IngestError::Catalog(_)) => {
            log::error!("{}", failure_message(input, &e));
            false
        }
        Err(e) => {
            log::warn!("{}", failure_message(input, &e));
            false
        }
    }
}

/// Text of a failure line. The logger adds the level prefix, so no marker
/// is added here.
fn failure_message(input: &str, err: &IngestError) -> String {
    match err {
        IngestError::Fetch(e) => format!("Could not fetch '{input}': {e}"),
        e => e.to_string(),
    }
}

fn fetch_spinner(quiet: bool, input: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(format!("Looking up {input}..."));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{FetchError, IdentifierError};

    #[test]
    fn fetch_failure_names_the_input() {
        let err = IngestError::Fetch(FetchError::NotSuccessful("999".into()));
        assert_eq!(
            failure_message("999", &err),
            "Could not fetch '999': Failed to fetch game data for AppID 999"
        );
    }

    #[test]
    fn failure_lines_carry_no_marker_of_their_own() {
        let errors = [
            IngestError::Identifier(IdentifierError::Unrecognized("abc".into())),
            IngestError::Fetch(FetchError::transport("timed out")),
            IngestError::Catalog(std::io::Error::other("disk full").into()),
        ];
        for err in &errors {
            let msg = failure_message("abc", err);
            assert!(!msg.contains('\u{2718}'), "{msg}");
            assert!(!msg.starts_with(char::is_whitespace), "{msg}");
        }
        assert_eq!(
            failure_message("abc", &errors[0]),
            "Could not parse AppID from 'abc'"
        );
    }
}
