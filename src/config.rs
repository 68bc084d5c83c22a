//! Advice configuration.
//!
//! Loaded from a YAML file with environment variable overrides, in the
//! priority order: environment, file, defaults.

use std::path::Path;

use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "ENTWINE_CONFIG";
/// Environment variable for logging filter configuration.
pub const LOG_ENV_VAR: &str = "ENTWINE_LOG";
/// Environment variable overriding the trap-exceptions flag.
pub const TRAP_EXCEPTIONS_ENV_VAR: &str = "ENTWINE_TRAP_EXCEPTIONS";

/// Configuration for logging advice.
///
/// Immutable once handed to an advice instance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Swallow errors at the interception boundary instead of letting
    /// them propagate to the caller.
    pub trap_exceptions: bool,
}

impl LoggingConfig {
    /// Load configuration from file and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(TRAP_EXCEPTIONS_ENV_VAR) {
            if let Ok(flag) = raw.parse() {
                self.trap_exceptions = flag;
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert!(!config.trap_exceptions);
    }

    #[test]
    fn test_parse_yaml() {
        let config: LoggingConfig = serde_yaml::from_str("trap_exceptions: true").unwrap();
        assert!(config.trap_exceptions);
    }

    #[test]
    fn test_parse_empty_yaml_uses_defaults() {
        let config: LoggingConfig = serde_yaml::from_str("{}").unwrap();
        assert!(!config.trap_exceptions);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "trap_exceptions: true").unwrap();

        let config = LoggingConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert!(config.trap_exceptions);
    }

    #[test]
    fn test_from_file_missing() {
        let result = LoggingConfig::from_file("/nonexistent/config.yaml");
        assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
    }

    #[test]
    fn test_env_override() {
        std::env::set_var(TRAP_EXCEPTIONS_ENV_VAR, "true");
        let mut config = LoggingConfig::default();
        config.apply_env_overrides();
        std::env::remove_var(TRAP_EXCEPTIONS_ENV_VAR);

        assert!(config.trap_exceptions);
    }
}
