//! Logging setup and step timing.

mod logging;
mod timer;

pub use logging::{init_logging, log_filter, DEFAULT_LOG_LEVEL};
pub use timer::StepTimer;
