use std::fmt;

use crate::error::IdentifierError;

/// Path segment that precedes the numeric id in Steam store URLs,
/// e.g. `https://store.steampowered.com/app/440/Team_Fortress_2/`.
const APP_SEGMENT: &str = "/app/";

/// A Steam application identifier in its string form.
///
/// The value is always non-empty and trimmed. [`AppId::parse`] additionally
/// guarantees it is all ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppId(String);

impl AppId {
    /// Accept any non-empty token as-is.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Extract an AppID from a store URL or a bare number.
    ///
    /// A URL wins when it contains `/app/<digits>`; otherwise the whole input
    /// must be digits.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if let Some(digits) = digits_after_app_segment(input) {
            return Ok(Self(digits.to_string()));
        }

        if input.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self(input.to_string()));
        }

        Err(IdentifierError::Unrecognized(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Find the first `/app/` segment followed by at least one digit.
fn digits_after_app_segment(input: &str) -> Option<&str> {
    input.match_indices(APP_SEGMENT).find_map(|(idx, _)| {
        let rest = &input[idx + APP_SEGMENT.len()..];
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        (len > 0).then(|| &rest[..len])
    })
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for AppId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
