//! Glue between the fetcher and the catalog: configuration and the
//! parse -> fetch -> append pipeline shared by frontends.

pub mod error;
pub mod ingest;
pub mod settings;

pub use error::SettingsError;
pub use ingest::{IngestError, IngestOutcome, Ingestor, steam_ingestor};
pub use settings::{
    DEFAULT_CATALOG, Overrides, SettingSource, SettingSources, Settings, SettingsFile,
    load_settings_file, save_settings, settings_path,
};

pub use shelf_catalog::{AppendOutcome, CatalogWriter, NormalizeReport};
pub use shelf_core::{AppId, FetchError, IdentifierError, MetadataSource, Record, Status};
pub use shelf_steam::{SteamClient, SteamConfig};
