use std::path::PathBuf;

/// Errors raised while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

impl SettingsError {
    pub fn invalid_value(var: &'static str, msg: impl Into<String>) -> Self {
        Self::InvalidValue {
            var,
            message: msg.into(),
        }
    }
}
