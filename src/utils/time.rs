//! RFC 3339 (de)serialization for message timestamps.
//!
//! Use as `#[serde(with = "crate::utils::time")]` on an `OffsetDateTime`.

use serde::{Deserialize, Deserializer, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Parse an RFC 3339 string into an `OffsetDateTime`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OffsetDateTime::parse(&s, &Rfc3339).map_err(serde::de::Error::custom)
}

/// Format an `OffsetDateTime` as an RFC 3339 string.
pub fn serialize<S>(datetime: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_rfc3339(datetime).map_err(serde::ser::Error::custom)?)
}

/// Format a timestamp as RFC 3339.
pub fn format_rfc3339(datetime: &OffsetDateTime) -> Result<String, time::error::Format> {
    datetime.format(&Rfc3339)
}
