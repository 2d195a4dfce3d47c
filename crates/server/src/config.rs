//! Monitor service configuration

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

/// Service configuration, read from `MONITOR_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Name attached to every structured log event
    #[serde(default = "default_instance_name")]
    pub instance_name: String,

    /// Port serving the view API, health probes and metrics
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            instance_name: default_instance_name(),
            api_port: default_api_port(),
        }
    }
}

fn default_instance_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "backup-monitor".to_string())
}

fn default_api_port() -> u16 {
    8080
}

impl MonitorConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("MONITOR"))
    }

    fn from_source(env: config::Environment) -> Result<Self> {
        let config = config::Config::builder().add_source(env).build()?;

        match config.try_deserialize() {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!(error = %err, "Invalid monitor configuration, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("MONITOR").source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::from_source(env(&[])).unwrap();
        assert_eq!(config.api_port, 8080);
        assert!(!config.instance_name.is_empty());
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = MonitorConfig::from_source(env(&[
            ("MONITOR_API_PORT", "9191"),
            ("MONITOR_INSTANCE_NAME", "monitor-east"),
        ]))
        .unwrap();

        assert_eq!(config.api_port, 9191);
        assert_eq!(config.instance_name, "monitor-east");
    }

    #[test]
    fn test_invalid_value_falls_back_to_defaults() {
        let config =
            MonitorConfig::from_source(env(&[("MONITOR_API_PORT", "not-a-port")])).unwrap();

        assert_eq!(config.api_port, 8080);
    }
}
