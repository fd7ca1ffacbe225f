///! TLE epoch helpers

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::SatDataError;
use crate::types::CatalogNumber;

/// Julian date of the Unix epoch (1970-01-01 00:00 UTC)
pub const JD_UNIX_EPOCH: f64 = 2440587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
const TLE_LINE_LENGTH: usize = 69;

/// Convert a UTC timestamp to a Julian date
pub fn julian_date(datetime: &NaiveDateTime) -> f64 {
    datetime.and_utc().timestamp_millis() as f64 / MILLIS_PER_DAY + JD_UNIX_EPOCH
}

/// Convert a Julian date back to UTC, rounded to the millisecond
pub fn julian_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let millis = ((jd - JD_UNIX_EPOCH) * MILLIS_PER_DAY).round();
    DateTime::from_timestamp_millis(millis as i64)
}

/// Validate a TLE pair and return its epoch as a Julian date.
///
/// The TLE must describe `catalog_number`: a record file named after one
/// satellite but holding another's elements is rejected with
/// [`SatDataError::CatalogMismatch`] instead of being listed under the
/// wrong number.
pub fn tle_epoch(
    catalog_number: CatalogNumber,
    line1: &str,
    line2: &str,
) -> Result<f64, SatDataError> {
    let (line1, line2) = (line1.trim(), line2.trim());
    for (number, line) in [('1', line1), ('2', line2)] {
        if line.len() != TLE_LINE_LENGTH || !line.is_ascii() || !line.starts_with(number) {
            return Err(SatDataError::InvalidTle {
                catalog_number,
                reason: format!("malformed line {}: {:?}", number, line),
            });
        }
    }

    let elements = sgp4::Elements::from_tle(None, line1.as_bytes(), line2.as_bytes())
        .map_err(|e| SatDataError::InvalidTle {
            catalog_number,
            reason: e.to_string(),
        })?;

    if elements.norad_id != u64::from(catalog_number) {
        return Err(SatDataError::CatalogMismatch {
            requested: catalog_number,
            found: elements.norad_id,
        });
    }

    Ok(julian_date(&elements.datetime))
}
