//! Rewrite a catalog into the canonical row format.
//!
//! Older catalogs were written with several quoting policies (no quoting,
//! CSV-minimal quoting, always-quoted titles with escaped quotes). This pass
//! reads any of them one physical line at a time and re-emits every row
//! through [`format_fields`].

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CatalogError;
use crate::format::{HEADER, format_fields, parse_line, quote_if_needed};

/// Number of columns in a canonical row.
const COLUMN_COUNT: usize = 5;

/// Counts from a [`normalize`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Non-blank data lines read (header excluded).
    pub rows: usize,
    /// Rows with exactly five columns, re-emitted canonically.
    pub rewritten: usize,
    /// Rows with more than five columns whose surplus was folded into tags.
    pub repaired: usize,
    /// Rows with fewer than five columns, copied with minimal quoting.
    pub passthrough: usize,
    /// Lines with an unbalanced quote, left unchanged.
    pub skipped: usize,
}

/// Read `input` and write the canonical form to `output`.
///
/// `input` and `output` may be the same file: the result is written to a
/// sibling temp file and renamed into place.
pub fn normalize(input: &Path, output: &Path) -> Result<NormalizeReport, CatalogError> {
    let bytes = fs::read(input)?;
    let content = String::from_utf8_lossy(&bytes);

    let tmp = output.with_extension("csv.tmp");
    let report = match write_rows(&tmp, &content) {
        Ok(report) => report,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };
    fs::rename(&tmp, output)?;

    log::debug!(
        "normalized {} rows from {} into {}",
        report.rows,
        input.display(),
        output.display()
    );
    Ok(report)
}

fn write_rows(path: &Path, content: &str) -> Result<NormalizeReport, CatalogError> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut report = NormalizeReport::default();

    writeln!(out, "{HEADER}")?;
    for (i, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        report.rows += 1;
        let line_no = i + 1;

        let Some(fields) = parse_line(line) else {
            log::warn!("Line {line_no} has an unbalanced quote; leaving it unchanged");
            report.skipped += 1;
            writeln!(out, "{line}")?;
            continue;
        };

        let row = match fields.len() {
            COLUMN_COUNT => {
                report.rewritten += 1;
                format_fields(&fields[0], &fields[1], &fields[2], &fields[3], &fields[4])
            }
            n if n > COLUMN_COUNT => {
                // Unquoted commas in the tags column split it; the image URL
                // is still the last field.
                log::warn!("Line {line_no} has {n} columns; merging the extra columns into tags");
                report.repaired += 1;
                let tags = fields[3..n - 1].join(",");
                format_fields(&fields[0], &fields[1], &fields[2], &tags, &fields[n - 1])
            }
            n => {
                log::warn!("Line {line_no} has only {n} columns; copying as-is");
                report.passthrough += 1;
                fields
                    .iter()
                    .map(|f| quote_if_needed(f))
                    .collect::<Vec<Cow<'_, str>>>()
                    .join(",")
            }
        };
        writeln!(out, "{row}")?;
    }
    out.flush()?;
    out.get_ref().sync_data()?;

    Ok(report)
}
