//! Testing utilities for steps and validators.
//!
//! This module provides:
//! - Log capture for asserting on emitted info/warning lines
//! - Recording command runner, fixed version gate and fixed validator fakes

mod fakes;
mod logs;

pub use fakes::{FixedValidator, FixedVersionGate, RecordingRunner};
pub use logs::{capture_logs, LogBuffer};
