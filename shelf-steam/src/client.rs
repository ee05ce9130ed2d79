use std::time::Duration;

use shelf_core::{AppId, FetchError, MetadataSource, Record, Status};

use crate::types::record_from_response;

pub const DEFAULT_API_BASE: &str = "https://store.steampowered.com/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest slice of a response body quoted back in error messages.
const ERROR_SNIPPET_LEN: usize = 200;

/// Connection settings for the storefront API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamConfig {
    /// Base URL without the trailing `/appdetails`.
    pub api_base: String,
    pub timeout: Duration,
    /// Storefront language (`l=`), e.g. "english". Affects names and genres.
    pub language: Option<String>,
    /// Country code (`cc=`), e.g. "us".
    pub country: Option<String>,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            language: None,
            country: None,
        }
    }
}

/// Blocking HTTP client for the Steam `appdetails` endpoint.
pub struct SteamClient {
    http: reqwest::blocking::Client,
    config: SteamConfig,
}

impl SteamClient {
    pub fn new(config: SteamConfig) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("shelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Full URL of the `appdetails` endpoint.
    pub fn app_details_url(&self) -> String {
        format!("{}/appdetails", self.config.api_base.trim_end_matches('/'))
    }

    fn query_params(&self, id: &AppId) -> Vec<(&'static str, String)> {
        let mut params = vec![("appids", id.to_string())];
        if let Some(ref lang) = self.config.language {
            params.push(("l", lang.clone()));
        }
        if let Some(ref cc) = self.config.country {
            params.push(("cc", cc.clone()));
        }
        params
    }

    /// Request the raw `appdetails` body for one AppID.
    pub fn fetch_app_details(&self, id: &AppId) -> Result<String, FetchError> {
        let url = self.app_details_url();
        log::debug!("GET {url}?appids={id}");

        let resp = self
            .http
            .get(&url)
            .query(&self.query_params(id))
            .send()
            .map_err(|e| FetchError::transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| FetchError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: snippet(&text).to_string(),
            });
        }

        log::debug!("appdetails for {id}: {} bytes", text.len());
        Ok(text)
    }
}

impl MetadataSource for SteamClient {
    fn name(&self) -> &'static str {
        "Steam"
    }

    fn fetch(&self, id: &AppId, status: Status) -> Result<Record, FetchError> {
        let body = self.fetch_app_details(id)?;
        record_from_response(id, &body, status)
    }
}

/// First few hundred bytes of `text`, cut on a char boundary.
pub(crate) fn snippet(text: &str) -> &str {
    if text.len() <= ERROR_SNIPPET_LEN {
        return text;
    }
    let mut end = ERROR_SNIPPET_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
