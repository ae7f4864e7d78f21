//! Layered monitor configuration
//!
//! Sources, lowest priority first: profile defaults, optional TOML file,
//! `POSTURE__*` environment variables. CLI overrides are applied by the caller.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use posture::{DetectorConfig, Profile};
use serde::{Deserialize, Serialize};

use crate::MonitorError;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "POSTURE";

/// Monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Profile the detector defaults come from
    pub profile: Profile,

    /// Slouch detector settings
    pub detector: DetectorConfig,

    /// Sampling interval (milliseconds)
    pub tick_interval_ms: u64,

    /// Route landmark points to the debug overlay
    pub debug_overlay: bool,

    /// Ring the terminal bell on alerts
    pub audio: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

impl MonitorConfig {
    /// Defaults with the detector settings of `profile`
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            detector: profile.config(),
            tick_interval_ms: 100,
            debug_overlay: false,
            audio: true,
        }
    }

    /// Load from an optional file and the process environment.
    ///
    /// `profile` overrides any profile named in the file or environment.
    pub fn load(path: Option<&Path>, profile: Option<Profile>) -> Result<Self, MonitorError> {
        Self::load_with_env(path, profile, None)
    }

    pub(crate) fn load_with_env(
        path: Option<&Path>,
        profile: Option<Profile>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, MonitorError> {
        // First pass only resolves the profile so its defaults can sit beneath
        // the file and environment layers.
        let profile = match profile {
            Some(profile) => profile,
            None => {
                Self::layered(&Self::default(), path, env.clone())?
                    .try_deserialize::<Self>()?
                    .profile
            }
        };

        let mut loaded: Self = Self::layered(&Self::for_profile(profile), path, env)?
            .try_deserialize()?;
        loaded.profile = profile;
        loaded.validated()
    }

    fn layered(
        defaults: &Self,
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Config, MonitorError> {
        let mut builder = Config::builder().add_source(Config::try_from(defaults)?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );
        Ok(builder.build()?)
    }

    /// Validate settings; sensitivity is clamped, not rejected
    pub fn validated(mut self) -> Result<Self, MonitorError> {
        if self.tick_interval_ms == 0 {
            return Err(MonitorError::InvalidConfig(
                "tick_interval_ms must be greater than zero".into(),
            ));
        }
        self.detector = self.detector.validated()?;
        Ok(self)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::load_with_env(None, None, env(&[])).unwrap();
        assert_eq!(config, MonitorConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.detector.sustain_count, 20);
    }

    #[test]
    fn test_file_layer() {
        let file = toml_file(
            "tick_interval_ms = 50\ndebug_overlay = true\n\n[detector]\nsensitivity = 60\n",
        );
        let config = MonitorConfig::load_with_env(Some(file.path()), None, env(&[])).unwrap();
        assert_eq!(config.tick_interval_ms, 50);
        assert!(config.debug_overlay);
        assert_eq!(config.detector.sensitivity, 60);
        assert_eq!(config.detector.cooldown_ms, 3000);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = toml_file("[detector]\nsensitivity = 60\n");
        let config = MonitorConfig::load_with_env(
            Some(file.path()),
            None,
            env(&[("POSTURE__DETECTOR__SENSITIVITY", "30")]),
        )
        .unwrap();
        assert_eq!(config.detector.sensitivity, 30);
    }

    #[test]
    fn test_env_sensitivity_out_of_range_is_clamped() {
        let config = MonitorConfig::load_with_env(
            None,
            None,
            env(&[("POSTURE__DETECTOR__SENSITIVITY", "300")]),
        )
        .unwrap();
        assert_eq!(config.detector.sensitivity, 100);

        let config = MonitorConfig::load_with_env(
            None,
            None,
            env(&[("POSTURE__DETECTOR__SENSITIVITY", "-5")]),
        )
        .unwrap();
        assert_eq!(config.detector.sensitivity, 1);
    }

    #[test]
    fn test_file_sensitivity_out_of_range_is_clamped() {
        let file = toml_file("[detector]\nsensitivity = 1000\n");
        let config = MonitorConfig::load_with_env(Some(file.path()), None, env(&[])).unwrap();
        assert_eq!(config.detector.sensitivity, 100);
    }

    #[test]
    fn test_profile_from_file_sets_defaults() {
        let file = toml_file("profile = \"responsive\"\n");
        let config = MonitorConfig::load_with_env(Some(file.path()), None, env(&[])).unwrap();
        assert_eq!(config.profile, Profile::Responsive);
        assert_eq!(config.detector.sustain_count, 3);
        assert_eq!(config.detector.cooldown_ms, 4000);
    }

    #[test]
    fn test_profile_override_keeps_explicit_values() {
        let file = toml_file("[detector]\ncooldown_ms = 5000\n");
        let config =
            MonitorConfig::load_with_env(Some(file.path()), Some(Profile::Responsive), env(&[]))
                .unwrap();
        assert_eq!(config.detector.sustain_count, 3);
        assert_eq!(config.detector.cooldown_ms, 5000);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = MonitorConfig::load_with_env(
            None,
            None,
            env(&[("POSTURE__TICK_INTERVAL_MS", "0")]),
        );
        assert!(matches!(result, Err(MonitorError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = Path::new("/nonexistent/posture.toml");
        let result = MonitorConfig::load_with_env(Some(path), None, env(&[]));
        assert!(matches!(result, Err(MonitorError::Config(_))));
    }
}
