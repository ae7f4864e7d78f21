//! Posture Monitor Driver
//!
//! Samples a landmark source at a fixed interval, feeds the slouch detector,
//! and forwards results to the alert dispatcher.

pub mod cli;
pub mod config;
pub mod driver;
pub mod logging;

pub use crate::config::MonitorConfig;
pub use driver::{Monitor, MonitorHandle, RunSummary, StopReason};
pub use logging::init_logging;

use thiserror::Error;

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<posture::PostureError> for MonitorError {
    fn from(e: posture::PostureError) -> Self {
        match e {
            posture::PostureError::Config(message) => MonitorError::InvalidConfig(message),
        }
    }
}
