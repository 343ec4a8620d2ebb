//! # Observation Timestamps
//!
//! Cached station records carry a UTC stamp in the form `2024-06-16 15:04:05`.
//! These helpers write and read that form and compute how long ago a stamp was
//! taken, in any time unit.

use crate::error::{NauticalError, Result};
use crate::units::{convert_time, TimeUnit};
use chrono::{DateTime, NaiveDateTime, Utc};

/// `strftime` layout of a stored stamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Read a stamp as UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT)?;
    Ok(naive.and_utc())
}

/// Whole `unit`s elapsed from `stamp` until `now`, rounded down.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use nautical_lib::timestamp::elapsed_since;
/// use nautical_lib::units::TimeUnit;
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 16, 15, 0, 0).unwrap();
/// let minutes = elapsed_since("2024-06-16 14:20:30", now, TimeUnit::Minutes).unwrap();
/// assert_eq!(minutes, 39);
/// ```
pub fn elapsed_since(stamp: &str, now: DateTime<Utc>, unit: TimeUnit) -> Result<u64> {
    let taken = parse_timestamp(stamp)?;
    let seconds = (now - taken).num_seconds();
    if seconds < 0 {
        return Err(NauticalError::FutureTimestamp {
            stamp: stamp.to_string(),
        });
    }

    let elapsed = convert_time(seconds as f64, TimeUnit::Seconds, unit);
    Ok(elapsed.floor() as u64)
}
