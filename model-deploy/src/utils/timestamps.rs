//! Timestamp helpers for resource naming.

use chrono::{DateTime, Utc};

/// Represents a UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// `strftime` format embedded in model and endpoint config names.
pub const DEPLOYMENT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Returns the current UTC timestamp.
#[must_use]
pub fn now_utc() -> Timestamp {
    Utc::now()
}

/// Formats a timestamp as a compact, sortable name suffix.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use model_deploy::utils::deployment_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
/// assert_eq!(deployment_timestamp(ts), "20240307090501");
/// ```
#[must_use]
pub fn deployment_timestamp(timestamp: Timestamp) -> String {
    timestamp.format(DEPLOYMENT_TIMESTAMP_FORMAT).to_string()
}
