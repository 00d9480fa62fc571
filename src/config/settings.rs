//! Application settings configuration
//!
//! Defines probe and alert settings loaded from TOML.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

/// Probe settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub timeout_secs: u64,
    pub port: u16,
    pub concurrency: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            port: 443,
            concurrency: 10,
        }
    }
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Alert settings for the scheduled run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertSettings {
    pub warning_days: BTreeSet<u32>,
    /// Console status boundary for "EXPIRING SOON"
    pub expiring_soon_days: i64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            warning_days: [30, 14, 7].into_iter().collect(),
            expiring_soon_days: 30,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(default)]
    pub alert: AlertSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse and validate settings from a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "probe.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.probe.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "probe.concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
