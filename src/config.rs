use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::ConfigError;
use crate::verification::RetryPolicy;

/// Application folder under the platform config directory
pub const APP_DIR_NAME: &str = "SerialOrderIntake";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationSettings {
    /// Simulated catalog lookup latency in milliseconds
    pub delay_ms: u64,

    /// Upper bound for one lookup attempt in milliseconds
    pub timeout_ms: u64,

    /// Extra attempts after a failed or timed-out lookup
    pub max_retries: u32,

    /// Pause between attempts in milliseconds
    pub retry_backoff_ms: u64,

    /// Probability (0.0-1.0) that a simulated lookup fails
    pub simulated_failure_rate: f64,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            timeout_ms: 5000,
            max_retries: 2,
            retry_backoff_ms: 250,
            simulated_failure_rate: 0.0,
        }
    }
}

impl VerificationSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(self.timeout_ms),
            max_retries: self.max_retries,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub verification: VerificationSettings,

    /// Default tracing filter; `RUST_LOG` takes precedence
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verification: VerificationSettings::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the platform-specific config directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            info!("Created default config at: {}", path.display());
            return Ok(config);
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        config.validate()?;

        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source,
        };

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| save_failed(Box::new(e)))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(Box::new(e)))?;
        fs::write(path, json).map_err(|e| save_failed(Box::new(e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.verification.simulated_failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "verification.simulated_failure_rate must be between 0.0 and 1.0, got {rate}"
            )));
        }
        if self.verification.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "verification.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.verification.delay_ms >= self.verification.timeout_ms {
            return Err(ConfigError::Invalid(format!(
                "verification.delay_ms ({}) must be less than verification.timeout_ms ({})",
                self.verification.delay_ms, self.verification.timeout_ms
            )));
        }
        Ok(())
    }

    /// Application directory in the user config folder
    pub fn app_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::app_dir()?.join("config.json"))
    }

    /// Get the config file path for display purposes
    pub fn config_path_display() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("serial-order-intake-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.verification.delay_ms, 1000);
        assert_eq!(config.verification.timeout_ms, 5000);
        assert_eq!(config.verification.max_retries, 2);
        assert_eq!(config.verification.simulated_failure_rate, 0.0);
        assert_eq!(config.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "verification": { "delay_ms": 10 } }"#).unwrap();
        assert_eq!(config.verification.delay_ms, 10);
        assert_eq!(config.verification.max_retries, 2);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_retry_policy_from_settings() {
        let policy = VerificationSettings::default().retry_policy();
        assert_eq!(policy.timeout, Duration::from_secs(5));
        assert_eq!(policy.total_attempts(), 3);
        assert_eq!(policy.backoff, Duration::from_millis(250));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.verification.simulated_failure_rate = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.verification.timeout_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // Every simulated lookup would time out
        let mut config = Config::default();
        config.verification.delay_ms = 5000;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.verification.delay_ms = 4999;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_creates_default_then_reads_back() {
        let path = scratch_path("roundtrip");
        let _ = fs::remove_file(&path);

        let created = Config::load_from(&path).unwrap();
        assert_eq!(created, Config::default());
        assert!(path.exists());

        let mut edited = created.clone();
        edited.log_filter = "debug".to_string();
        edited.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().log_filter, "debug");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_reports_malformed_file() {
        let path = scratch_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed { .. }));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
