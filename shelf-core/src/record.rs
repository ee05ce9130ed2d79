use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a game sits in the personal backlog.
///
/// New records always start with a single configured status; nothing in the
/// workspace moves a record between states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Backlog,
    Playing,
    Finished,
    Dropped,
}

const ALL_STATUSES: &[Status] = &[
    Status::Backlog,
    Status::Playing,
    Status::Finished,
    Status::Dropped,
];

impl Status {
    /// Lowercase tag written to the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Playing => "playing",
            Self::Finished => "finished",
            Self::Dropped => "dropped",
        }
    }

    pub fn all() -> &'static [Status] {
        ALL_STATUSES
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status '{0}' (expected one of: backlog, playing, finished, dropped)")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for Status {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// External identifier; unique within a catalog.
    pub id: String,
    /// Display name, free text.
    pub title: String,
    pub status: Status,
    /// Genre labels in the order the source returned them.
    pub tags: Vec<String>,
    /// Header image URL.
    pub image: String,
}

impl Record {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: Status::default(),
            tags: Vec::new(),
            image: String::new(),
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_backlog() {
        assert_eq!(Status::default(), Status::Backlog);
        assert_eq!(Record::new("1", "x").status, Status::Backlog);
    }

    #[test]
    fn status_names_round_trip() {
        for &status in Status::all() {
            let parsed: Status = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!("Playing".parse::<Status>().unwrap(), Status::Playing);
        assert_eq!(" DROPPED ".parse::<Status>().unwrap(), Status::Dropped);
        assert!("wishlist".parse::<Status>().is_err());
    }

    #[test]
    fn builder_sets_fields() {
        let record = Record::new("440", "Team Fortress 2")
            .with_tags(["Free to Play", "Action"])
            .with_image("http://x/img.jpg")
            .with_status(Status::Playing);
        assert_eq!(record.tags, vec!["Free to Play", "Action"]);
        assert_eq!(record.image, "http://x/img.jpg");
        assert_eq!(record.status, Status::Playing);
    }
}
