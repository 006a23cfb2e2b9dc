use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `2025-12-27T21:51:40.310+0000`
const FORMAT_FRACTIONAL: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
/// `2025-12-27T21:51:40+0000`
const FORMAT_PLAIN: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parse a portal timestamp, keeping its numeric UTC offset.
///
/// The portal emits timestamps with and without fractional seconds.
/// Anything it cannot parse is treated as absent, never as an error.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s, FORMAT_FRACTIONAL)
        .or_else(|_| DateTime::parse_from_str(s, FORMAT_PLAIN))
        .ok()
}

/// Parse a plain date like `2026-01-31`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(parse_timestamp))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(parse_date))
}
