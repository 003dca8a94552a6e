//! Utility functions.

mod timestamps;

pub use timestamps::{deployment_timestamp, now_utc, Timestamp, DEPLOYMENT_TIMESTAMP_FORMAT};
