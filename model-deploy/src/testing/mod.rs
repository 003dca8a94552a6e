//! Testing utilities for deployment config runs.
//!
//! This module provides:
//! - An in-memory registry that records the calls made against it
//! - Fixtures for run arguments and stage config files

mod fake;
mod fixtures;

pub use fake::FakeRegistry;
pub use fixtures::{sample_args, write_stage_config};
