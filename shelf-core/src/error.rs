/// Errors produced while turning user input into an [`AppId`](crate::AppId).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("No AppID or URL given")]
    Empty,

    #[error("Could not parse AppID from '{0}'")]
    Unrecognized(String),
}

/// A failed metadata lookup. Every variant ends the attempt; nothing is
/// retried and nothing reaches the catalog.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Failed to fetch game data for AppID {0}")]
    NotSuccessful(String),
}

impl FetchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
