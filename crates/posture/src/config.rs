//! Detector configuration

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::PostureError;

/// Lowest accepted sensitivity dial value
pub const MIN_SENSITIVITY: u8 = 1;
/// Highest accepted sensitivity dial value
pub const MAX_SENSITIVITY: u8 = 100;

/// Slouch detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// User-facing dial (1-100). Higher means easier to trigger.
    #[serde(deserialize_with = "deserialize_sensitivity")]
    pub sensitivity: u8,

    /// Threshold reached at sensitivity 100
    pub min_threshold: f32,

    /// Threshold approached as sensitivity goes to 0
    pub max_threshold: f32,

    /// Consecutive over-threshold ticks that must be exceeded before alerting
    pub sustain_count: u32,

    /// Minimum spacing between two alerts (milliseconds)
    pub cooldown_ms: u64,

    /// Counter decrement per non-slouching tick
    pub decay_on_good: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sensitivity: 80,
            min_threshold: 0.05,
            max_threshold: 0.25,
            sustain_count: 20,
            cooldown_ms: 3000,
            decay_on_good: 1,
        }
    }
}

impl DetectorConfig {
    /// Short sustain window with a longer cooldown
    pub fn responsive() -> Self {
        Self {
            sustain_count: 3,
            cooldown_ms: 4000,
            ..Default::default()
        }
    }

    /// Sensitivity clamped into `[1, 100]`
    pub fn clamped_sensitivity(&self) -> u8 {
        clamp_sensitivity(self.sensitivity)
    }

    /// Check the threshold bounds and clamp the sensitivity dial.
    ///
    /// Out-of-range sensitivity is corrected rather than rejected so the
    /// detector stays operable; inverted or non-finite bounds are an error.
    pub fn validated(mut self) -> Result<Self, PostureError> {
        if !self.min_threshold.is_finite() || !self.max_threshold.is_finite() {
            return Err(PostureError::Config(
                "threshold bounds must be finite".into(),
            ));
        }
        if self.min_threshold >= self.max_threshold {
            return Err(PostureError::Config(format!(
                "min_threshold {} must be below max_threshold {}",
                self.min_threshold, self.max_threshold
            )));
        }
        let clamped = self.clamped_sensitivity();
        if clamped != self.sensitivity {
            warn!(
                "Sensitivity {} out of range, clamped to {}",
                self.sensitivity, clamped
            );
            self.sensitivity = clamped;
        }
        Ok(self)
    }
}

/// Clamp a raw dial value into `[1, 100]`
pub fn clamp_sensitivity(sensitivity: u8) -> u8 {
    sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY)
}

/// Clamp a dial value of any integer width into `[1, 100]`, warning when it
/// had to move
pub fn clamp_raw_sensitivity(raw: i64) -> u8 {
    let clamped = raw.clamp(MIN_SENSITIVITY.into(), MAX_SENSITIVITY.into()) as u8;
    if i64::from(clamped) != raw {
        warn!("Sensitivity {} out of range, clamped to {}", raw, clamped);
    }
    clamped
}

// Config files and env vars may carry any integer; the dial is clamped, not rejected
fn deserialize_sensitivity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_raw_sensitivity)
}

/// Named detector profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// 20 ticks sustained, 3 s cooldown
    #[default]
    Reference,
    /// 3 ticks sustained, 4 s cooldown
    Responsive,
}

impl Profile {
    /// Detector configuration for this profile
    pub fn config(self) -> DetectorConfig {
        match self {
            Profile::Reference => DetectorConfig::default(),
            Profile::Responsive => DetectorConfig::responsive(),
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = PostureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(Profile::Reference),
            "responsive" => Ok(Profile::Responsive),
            other => Err(PostureError::Config(format!("unknown profile: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        let reference = Profile::Reference.config();
        assert_eq!(reference.sustain_count, 20);
        assert_eq!(reference.cooldown_ms, 3000);

        let responsive = Profile::Responsive.config();
        assert_eq!(responsive.sustain_count, 3);
        assert_eq!(responsive.cooldown_ms, 4000);
        assert_eq!(responsive.sensitivity, reference.sensitivity);
    }

    #[test]
    fn test_sensitivity_clamped() {
        let config = DetectorConfig {
            sensitivity: 0,
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(config.sensitivity, 1);

        let config = DetectorConfig {
            sensitivity: 250,
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(config.sensitivity, 100);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let config = DetectorConfig {
            min_threshold: 0.3,
            max_threshold: 0.1,
            ..Default::default()
        };
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: DetectorConfig = serde_json::from_str(r#"{"sensitivity": 60}"#).unwrap();
        assert_eq!(config.sensitivity, 60);
        assert_eq!(config.sustain_count, 20);
        assert_eq!(config.decay_on_good, 1);
    }

    #[test]
    fn test_wide_sensitivity_clamped_on_deserialize() {
        let config: DetectorConfig = serde_json::from_str(r#"{"sensitivity": 300}"#).unwrap();
        assert_eq!(config.sensitivity, 100);

        let config: DetectorConfig = serde_json::from_str(r#"{"sensitivity": -5}"#).unwrap();
        assert_eq!(config.sensitivity, 1);
    }

    #[test]
    fn test_clamp_raw_sensitivity() {
        assert_eq!(clamp_raw_sensitivity(i64::MIN), 1);
        assert_eq!(clamp_raw_sensitivity(0), 1);
        assert_eq!(clamp_raw_sensitivity(42), 42);
        assert_eq!(clamp_raw_sensitivity(256), 100);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("Responsive".parse::<Profile>().unwrap(), Profile::Responsive);
        assert!("lazy".parse::<Profile>().is_err());
    }
}
