//! Typed identifier for media items.
//!
//! The media server addresses every movie, show, season and episode by a
//! positive integer "rating key". Wrapping it keeps zero and negative values
//! out of the request path and the client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

/// The media server's stable integer identifier for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RatingKey(NonZeroU64);

impl RatingKey {
    /// Build a rating key, rejecting zero.
    #[must_use]
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    /// Return the raw integer value.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for RatingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string or integer is not a valid rating key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid rating key: {0}")]
pub struct InvalidRatingKey(pub String);

impl TryFrom<u64> for RatingKey {
    type Error = InvalidRatingKey;

    fn try_from(value: u64) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| InvalidRatingKey(value.to_string()))
    }
}

impl From<RatingKey> for u64 {
    fn from(key: RatingKey) -> Self {
        key.get()
    }
}

impl FromStr for RatingKey {
    type Err = InvalidRatingKey;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidRatingKey(s.to_string()))
    }
}
