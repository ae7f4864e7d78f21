//! Command line interface for the posture monitor

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use posture::{clamp_raw_sensitivity, Profile};

use crate::config::MonitorConfig;

/// Watch a landmark stream and nag about slouching
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON-lines landmark recording to replay (stdin when omitted)
    #[arg(short, long)]
    pub replay: Option<PathBuf>,

    /// Detector profile
    #[arg(short, long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Sensitivity dial, 1 (lax) to 100 (strict); other values are clamped
    #[arg(short, long, allow_negative_numbers = true)]
    pub sensitivity: Option<i64>,

    /// Sampling interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Log landmark points for every tick
    #[arg(long)]
    pub debug_overlay: bool,

    /// Do not ring the terminal bell on alerts
    #[arg(long)]
    pub quiet_audio: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// Profile names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Reference,
    Responsive,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Reference => Profile::Reference,
            ProfileArg::Responsive => Profile::Responsive,
        }
    }
}

impl Cli {
    /// Apply command line overrides on top of loaded configuration
    pub fn apply_overrides(&self, config: &mut MonitorConfig) {
        if let Some(sensitivity) = self.sensitivity {
            config.detector.sensitivity = clamp_raw_sensitivity(sensitivity);
        }
        if let Some(interval_ms) = self.interval_ms {
            config.tick_interval_ms = interval_ms;
        }
        if self.debug_overlay {
            config.debug_overlay = true;
        }
        if self.quiet_audio {
            config.audio = false;
        }
    }
}
