//! Broker configuration loaded from TOML.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use solo_term_window::DEFAULT_WINDOW_KEY;
use tracing::info;

use crate::error::BrokerError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

/// Broker runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Leader poll interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Size of the shared region in bytes.
    #[serde(default = "default_region_size")]
    pub region_size: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl BrokerConfig {
    /// The poll interval as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            region_size: default_region_size(),
            log_level: default_log_level(),
        }
    }
}

/// User identity settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Override for the OS account name. Coordination is scoped per
    /// identity, so distinct values here never collide.
    #[serde(default)]
    pub user: Option<String>,
}

/// Leader window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Well-known key followers use to find the leader's window.
    #[serde(default = "default_lookup_key")]
    pub lookup_key: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            lookup_key: default_lookup_key(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_region_size() -> usize {
    solo_term_channel::DEFAULT_REGION_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_lookup_key() -> String {
    DEFAULT_WINDOW_KEY.to_string()
}

/// Load configuration from the given path, or the default location.
pub fn load_config(path: Option<&str>) -> Result<Config, BrokerError> {
    let config_path = match path {
        Some(p) => PathBuf::from(p),
        None => default_config_path(),
    };

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| BrokerError::Config(format!("failed to read config: {e}")))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| BrokerError::Config(format!("failed to parse config: {e}")))?;
        info!(path = %config_path.display(), "loaded config");
        Ok(config)
    } else {
        info!("no config file found, using defaults");
        Ok(Config::default())
    }
}

/// Default config path: `$XDG_CONFIG_HOME/solo-term/config.toml` or the
/// platform equivalent.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("solo-term")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("poll_interval_ms = 1000"));
        assert!(toml_str.contains("region_size = 4096"));
    }

    #[test]
    fn parse_example_config() {
        let toml_str = r#"
[broker]
poll_interval_ms = 250
region_size = 8192
log_level = "debug"

[identity]
user = "build-bot"

[window]
lookup_key = "SoloTerm_MainWindow"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.broker.poll_interval_ms, 250);
        assert_eq!(config.broker.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.broker.region_size, 8192);
        assert_eq!(config.identity.user.as_deref(), Some("build-bot"));
        assert_eq!(config.window.lookup_key, "SoloTerm_MainWindow");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.broker.poll_interval_ms, 1000);
        assert!(config.identity.user.is_none());
        assert_eq!(config.window.lookup_key, DEFAULT_WINDOW_KEY);
    }
}
