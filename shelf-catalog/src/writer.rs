use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use shelf_core::Record;

use crate::error::CatalogError;
use crate::format::{HEADER, first_field, format_row};

/// Result of a successful [`CatalogWriter::append`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The row was written.
    Appended,
    /// A row with the same id already exists; nothing was written.
    SkippedDuplicate,
}

/// Appends records to a CSV catalog while keeping the id column unique.
///
/// Uniqueness relies on a read-then-append check and is only guaranteed for
/// a single writer. `append` takes `&mut self` so a process holding one
/// writer serializes its own mutations.
#[derive(Debug)]
pub struct CatalogWriter {
    path: PathBuf,
}

impl CatalogWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Collect the first column of every line after the first.
    ///
    /// The first line is skipped unconditionally, header or not. A missing
    /// file yields an empty set.
    pub fn existing_ids(&self) -> Result<HashSet<String>, CatalogError> {
        let ids = scan_ids(&self.read_contents()?);
        log::debug!("{} existing ids in {}", ids.len(), self.path.display());
        Ok(ids)
    }

    pub fn contains(&self, id: &str) -> Result<bool, CatalogError> {
        Ok(self.existing_ids()?.contains(id.trim()))
    }

    /// Append `record` unless its id is already in the catalog.
    ///
    /// A missing, empty or whitespace-only file is (re)started with the
    /// header line. Header and row go out in one write; if it fails the file
    /// is restored to what it held before.
    pub fn append(&mut self, record: &Record) -> Result<AppendOutcome, CatalogError> {
        let content = self.read_contents()?;
        if scan_ids(&content).contains(record.id.trim()) {
            log::debug!("{} already in {}, skipping", record.id, self.path.display());
            return Ok(AppendOutcome::SkippedDuplicate);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let original_len = file.metadata()?.len();

        let blank = content.trim().is_empty();
        let mut buf = String::new();
        if blank {
            if !content.is_empty() {
                log::debug!("{} holds only whitespace, starting over", self.path.display());
                file.set_len(0)?;
            }
            buf.push_str(HEADER);
            buf.push('\n');
        } else if !content.ends_with('\n') {
            buf.push('\n');
        }
        buf.push_str(&format_row(record));
        buf.push('\n');

        let written = file
            .write_all(buf.as_bytes())
            .and_then(|()| file.flush())
            .and_then(|()| file.sync_data());
        if let Err(e) = written {
            let restored = if blank {
                // Only whitespace was there, so the decoded text is exact.
                file.set_len(0)
                    .and_then(|()| file.write_all(content.as_bytes()))
            } else {
                file.set_len(original_len)
            };
            if let Err(rollback) = restored {
                log::warn!(
                    "Failed to roll back partial write to {}: {rollback}",
                    self.path.display()
                );
            }
            return Err(e.into());
        }

        Ok(AppendOutcome::Appended)
    }

    fn read_contents(&self) -> Result<String, CatalogError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Collect ids line by line, skipping the first line.
///
/// Each physical line is parsed on its own, so an unbalanced quote on one
/// row cannot hide the rows after it.
pub(crate) fn scan_ids(content: &str) -> HashSet<String> {
    content.lines().skip(1).filter_map(first_field).collect()
}
