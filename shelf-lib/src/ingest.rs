//! The ingestion pipeline: parse an AppID, fetch its metadata and append it
//! to the catalog.
//!
//! Each call to [`Ingestor::ingest`] is one independent attempt. A failure at
//! any stage ends that attempt and leaves the catalog untouched.

use shelf_catalog::{AppendOutcome, CatalogError, CatalogWriter};
use shelf_core::{AppId, FetchError, IdentifierError, MetadataSource, Record, Status};
use shelf_steam::SteamClient;

use crate::settings::Settings;

/// Successful result of one ingestion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A new row was appended.
    Added(Record),
    /// The id was already catalogued.
    Duplicate(AppId),
}

/// A failed ingestion attempt.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to update catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Runs inputs through a metadata source into one catalog.
pub struct Ingestor<S> {
    source: S,
    writer: CatalogWriter,
    status: Status,
}

impl<S: MetadataSource> Ingestor<S> {
    pub fn new(source: S, writer: CatalogWriter) -> Self {
        Self {
            source,
            writer,
            status: Status::default(),
        }
    }

    /// Status assigned to newly added records.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn writer(&self) -> &CatalogWriter {
        &self.writer
    }

    /// Parse `input` as an AppID or store URL and ingest it.
    pub fn ingest(&mut self, input: &str) -> Result<IngestOutcome, IngestError> {
        let id = AppId::parse(input)?;
        self.ingest_id(&id)
    }

    /// Ingest an already parsed id.
    ///
    /// Ids already in the catalog are reported as duplicates without a
    /// network request. The writer repeats the check before appending.
    pub fn ingest_id(&mut self, id: &AppId) -> Result<IngestOutcome, IngestError> {
        if self.writer.contains(id.as_str())? {
            log::debug!("{id} already catalogued, not fetching");
            return Ok(IngestOutcome::Duplicate(id.clone()));
        }

        log::debug!("Fetching {id} from {}", self.source.name());
        let record = self.source.fetch(id, self.status)?;

        match self.writer.append(&record)? {
            AppendOutcome::Appended => Ok(IngestOutcome::Added(record)),
            AppendOutcome::SkippedDuplicate => Ok(IngestOutcome::Duplicate(id.clone())),
        }
    }
}

/// Build an ingestor backed by the Steam storefront from resolved settings.
pub fn steam_ingestor(settings: &Settings) -> Result<Ingestor<SteamClient>, FetchError> {
    let client = SteamClient::new(settings.steam.clone())?;
    let writer = CatalogWriter::new(settings.catalog_path.clone());
    Ok(Ingestor::new(client, writer).with_status(settings.default_status))
}
