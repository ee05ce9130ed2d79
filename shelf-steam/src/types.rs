use std::collections::HashMap;

use serde::Deserialize;

use shelf_core::{AppId, FetchError, Record, Status};

use crate::client::snippet;

/// Per-app entry of an `appdetails` response.
///
/// The response is an object keyed by the requested AppID:
/// `{"440": {"success": true, "data": {...}}}`. `data` is kept untyped here
/// because Steam sends `[]` instead of an object for some failed lookups.
#[derive(Debug, Deserialize)]
pub struct AppDetailsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// The subset of the store payload the catalog cares about.
#[derive(Debug, Deserialize, Clone)]
pub struct AppData {
    pub name: String,
    pub header_image: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default, rename = "type")]
    pub app_type: Option<String>,
    #[serde(default)]
    pub steam_appid: Option<u64>,
}

impl AppData {
    /// Genre descriptions in response order.
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.description.clone()).collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Genre {
    pub description: String,
}

/// Map a raw `appdetails` body to a catalog record.
///
/// The record id is the requested AppID, never the one echoed back in the
/// payload.
pub fn record_from_response(id: &AppId, body: &str, status: Status) -> Result<Record, FetchError> {
    let mut response: HashMap<String, AppDetailsEnvelope> = serde_json::from_str(body)
        .map_err(|e| FetchError::malformed(format!("{e}. Response: {}", snippet(body))))?;

    let envelope = response
        .remove(id.as_str())
        .ok_or_else(|| FetchError::malformed(format!("no entry for AppID {id} in response")))?;

    if !envelope.success {
        return Err(FetchError::NotSuccessful(id.to_string()));
    }

    let data = envelope
        .data
        .ok_or_else(|| FetchError::malformed(format!("AppID {id} has no data object")))?;
    let app: AppData = serde_json::from_value(data)
        .map_err(|e| FetchError::malformed(format!("unexpected data for AppID {id}: {e}")))?;

    if let Some(ref kind) = app.app_type {
        log::debug!("AppID {id} is of type '{kind}'");
    }
    if let Some(echoed) = app.steam_appid.filter(|n| n.to_string() != id.as_str()) {
        log::debug!("AppID {id} resolved to {echoed}; keeping the requested id");
    }

    let tags = app.genre_names();
    Ok(Record::new(id.as_str(), app.name)
        .with_status(status)
        .with_tags(tags)
        .with_image(app.header_image))
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
