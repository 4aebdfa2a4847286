//! Core module - shared infrastructure for Cartwright
//!
//! This module contains configuration, error handling, and the run report
//! used throughout the application.

pub mod config;
pub mod error;
pub mod report;

pub use config::{CheckoutConfig, RunnerConfig, Timeouts};
pub use error::{CartwrightError, Result};
pub use report::{RunReport, StepOutcome};
