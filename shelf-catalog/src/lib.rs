//! Flat-file CSV catalog of games.
//!
//! The catalog is append-only: [`CatalogWriter::append`] adds a row only when
//! its id is not already present, and [`normalize`] rewrites an existing file
//! into the canonical row format.

pub mod error;
pub mod format;
pub mod normalize;
pub mod writer;

pub use error::CatalogError;
pub use format::{HEADER, TAG_SEPARATOR, format_row};
pub use normalize::{NormalizeReport, normalize};
pub use writer::{AppendOutcome, CatalogWriter};
