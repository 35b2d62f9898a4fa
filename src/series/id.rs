//! Series id validation.
//!
//! The id is interpolated into the outbound URL, so only short runs of ASCII
//! digits are let through.

use std::fmt;
use std::str::FromStr;

use crate::series::types::FeedError;

/// A validated series id: 1 to 8 ASCII decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesId(String);

impl SeriesId {
    /// Longest id accepted.
    pub const MAX_DIGITS: usize = 8;

    /// Validate a raw path segment.
    ///
    /// The original text is kept, so leading zeros survive into the upstream
    /// URL and the feed's home page link.
    pub fn parse(raw: &str) -> Result<Self, FeedError> {
        let valid = !raw.is_empty()
            && raw.len() <= Self::MAX_DIGITS
            && raw.bytes().all(|b| b.is_ascii_digit());

        if !valid {
            return Err(FeedError::BadRequest(
                "series id must be 1 to 8 ASCII digits",
            ));
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SeriesId {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
