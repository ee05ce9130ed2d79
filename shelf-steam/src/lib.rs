//! Steam storefront metadata fetcher.
//!
//! [`SteamClient`] performs one blocking `appdetails` request per lookup and
//! maps the payload to a [`shelf_core::Record`].

pub mod client;
pub mod types;

pub use client::{DEFAULT_API_BASE, DEFAULT_TIMEOUT, SteamClient, SteamConfig};
pub use types::{AppData, AppDetailsEnvelope, Genre, record_from_response};
