use chrono::{DateTime, NaiveDateTime, Utc};

use crate::elements::error::EpochParseError;

const EPOCH_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a catalog epoch such as `2019-03-24T05:11:47.000288`.
///
/// Timestamps without an offset are UTC. A trailing `Z` or an explicit
/// RFC 3339 offset is also accepted.
pub fn parse_epoch(value: &str) -> Result<DateTime<Utc>, EpochParseError> {
    let trimmed = value.trim();
    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    if let Ok(datetime) = NaiveDateTime::parse_from_str(naive, EPOCH_FORMAT) {
        return Ok(datetime.and_utc());
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| EpochParseError {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
