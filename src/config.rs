use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::elements::ElementSource;
use crate::propagator::PropagatorContext;

pub const DEFAULT_SAMPLES_PER_PERIOD: u32 = 11;
pub const DEFAULT_PERIOD_TOLERANCE: f64 = 5e-3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Run settings. Every field has a default, so no config file is needed.
///
/// ```yaml
/// samples_per_period: 11
/// element_source: fields   # or tle
/// propagator:
///   geopotential: wgs72    # or wgs84
///   mode: improved         # or afspc
/// jobs: 4
/// period_tolerance: 0.005
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub samples_per_period: u32,
    pub element_source: ElementSource,
    pub propagator: PropagatorContext,
    pub jobs: usize,
    pub period_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples_per_period: DEFAULT_SAMPLES_PER_PERIOD,
            element_source: ElementSource::default(),
            propagator: PropagatorContext::default(),
            jobs: 1,
            period_tolerance: DEFAULT_PERIOD_TOLERANCE,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_period == 0 {
            return Err(ConfigError::Invalid(
                "samples_per_period must be at least 1".into(),
            ));
        }
        if i32::try_from(self.samples_per_period).is_err() {
            return Err(ConfigError::Invalid(format!(
                "samples_per_period {} does not fit the trace header",
                self.samples_per_period
            )));
        }
        if self.jobs == 0 {
            return Err(ConfigError::Invalid("jobs must be at least 1".into()));
        }
        if !(self.period_tolerance.is_finite() && self.period_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "period_tolerance must be a non-negative number, got {}",
                self.period_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagator::{Geopotential, OpsMode};

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.samples_per_period, 11);
        assert_eq!(config.propagator.geopotential, Geopotential::Wgs72);
        assert_eq!(config.propagator.mode, OpsMode::Improved);
        assert_eq!(config.element_source, ElementSource::Fields);
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
samples_per_period: 10
element_source: tle
propagator:
  geopotential: wgs84
  mode: afspc
jobs: 4
period_tolerance: 0.01
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.samples_per_period, 10);
        assert_eq!(config.element_source, ElementSource::Tle);
        assert_eq!(config.propagator.geopotential, Geopotential::Wgs84);
        assert_eq!(config.propagator.mode, OpsMode::Afspc);
        assert_eq!(config.jobs, 4);
        assert_eq!(config.period_tolerance, 0.01);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            Config::from_yaml("samples_per_period: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(Config::from_yaml("jobs: 0"), Err(ConfigError::Invalid(_))));
        assert!(matches!(
            Config::from_yaml("period_tolerance: -1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("samples: 11"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            Config::from_yaml("element_source: omm"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.yaml");
        std::fs::write(&path, "samples_per_period: 10\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap().samples_per_period, 10);
        assert!(matches!(
            Config::from_file(&dir.path().join("absent.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
