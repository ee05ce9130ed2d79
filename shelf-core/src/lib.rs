//! Shared types for the shelf workspace: the catalog record, the Steam AppID,
//! and the `MetadataSource` trait that fetchers implement.

pub mod appid;
pub mod error;
pub mod record;

pub use appid::AppId;
pub use error::{FetchError, IdentifierError};
pub use record::{Record, Status, StatusParseError};

/// A remote service that can resolve an identifier into a catalog record.
///
/// Implementations perform at most one blocking request per call and never
/// retry; the caller decides what to do with a failure.
pub trait MetadataSource {
    /// Short human-readable name of the service (e.g. "Steam").
    fn name(&self) -> &'static str;

    /// Fetch metadata for `id` and map it to a [`Record`] with the given
    /// initial status.
    fn fetch(&self, id: &AppId, status: Status) -> Result<Record, FetchError>;
}
