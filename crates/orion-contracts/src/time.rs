// orion-contracts/src/time.rs
// ============================================================================
// Module: ORION Time Model
// Description: RFC 3339 UTC timestamp representation for ORION records.
// Purpose: Provide a serializable timestamp type shared by every record kind.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! §3 requires every record to carry an "ISO-8601 UTC `timestamp`" and §6
//! pins the wire format to RFC 3339. [`Timestamp`] wraps [`OffsetDateTime`]
//! and serializes through the RFC 3339 string form in both directions, so a
//! malformed timestamp on the wire is rejected at deserialization rather
//! than accepted and silently coerced.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// RFC 3339 UTC timestamp.
///
/// # Invariants
/// - Always normalized to UTC on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Wraps an existing offset date-time, normalizing it to UTC.
    #[must_use]
    pub fn from_offset(value: OffsetDateTime) -> Self {
        Self(value.to_offset(time::UtcOffset::UTC))
    }

    /// Returns the underlying offset date-time.
    #[must_use]
    pub const fn as_offset(&self) -> OffsetDateTime {
        self.0
    }

    /// Returns `true` when `self` is at or after `other`.
    #[must_use]
    pub fn is_at_or_after(&self, other: Self) -> bool {
        self.0 >= other.0
    }

    /// Adds a duration, returning a new timestamp.
    #[must_use]
    pub fn plus(&self, duration: time::Duration) -> Self {
        Self(self.0 + duration)
    }

    /// Parses a timestamp from its RFC 3339 string form.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` is not a valid RFC 3339 timestamp.
    pub fn parse_rfc3339(value: &str) -> Result<Self, time::error::Parse> {
        OffsetDateTime::parse(value, &Rfc3339).map(Self::from_offset)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = self.0.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse_rfc3339(&text).map_err(D::Error::custom)
    }
}
