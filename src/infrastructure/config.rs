// Configuration loading - Optional TOML file plus environment overrides
use crate::application::engine::{DEFAULT_DETAIL_ROWS, DEFAULT_WINDOW_SIZE, EngineSettings};
use crate::application::scheduler::DEFAULT_COUNTDOWN_SECONDS;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE: &str = "config/dashboard";
const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub window_size: usize,
    pub countdown_seconds: u32,
    pub tick_interval_ms: u64,
    pub detail_rows: usize,
    pub auto_refresh: bool,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_interval_ms: 1000,
            detail_rows: DEFAULT_DETAIL_ROWS,
            auto_refresh: true,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            window_size: self.window_size,
            detail_rows: self.detail_rows,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PresentationConfig {
    pub render_on_tick: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: &'static str },
}

/// Load `config/dashboard.{toml,...}` if present, then `DASHBOARD__*`
/// environment overrides (e.g. `DASHBOARD__ENGINE__SEED=7`).
pub fn load_dashboard_config() -> Result<DashboardConfig, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(environment())
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.window_size == 0 {
            return Err(ConfigError::Invalid {
                key: "engine.window_size",
                reason: "must be greater than zero",
            });
        }
        if self.engine.countdown_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "engine.countdown_seconds",
                reason: "must be greater than zero",
            });
        }
        if self.engine.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "engine.tick_interval_ms",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_dashboard_config(toml: &str) -> Result<DashboardConfig, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_dashboard_config("").unwrap();

        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.engine.window_size, 30);
        assert_eq!(config.engine.countdown_seconds, 60);
        assert_eq!(config.engine.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.log.filter, "info");
        assert!(config.engine.auto_refresh);
    }

    #[test]
    fn test_partial_override() {
        let config = parse_dashboard_config(
            r#"
            [engine]
            seed = 42
            auto_refresh = false

            [presentation]
            render_on_tick = true
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.seed, Some(42));
        assert!(!config.engine.auto_refresh);
        assert_eq!(config.engine.detail_rows, 15);
        assert!(config.presentation.render_on_tick);
    }

    #[test]
    fn test_environment_overrides_use_double_underscore() {
        let vars = [
            ("DASHBOARD__ENGINE__SEED", "7"),
            ("DASHBOARD__ENGINE__AUTO_REFRESH", "false"),
            ("DASHBOARD__LOG__FILTER", "debug"),
            ("DASHBOARD_ENGINE_WINDOW_SIZE", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<config::Map<String, String>>();

        let settings = config::Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap();
        let config: DashboardConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.engine.seed, Some(7));
        assert!(!config.engine.auto_refresh);
        assert_eq!(config.log.filter, "debug");
        assert_eq!(config.engine.window_size, 30);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let err = parse_dashboard_config("[engine]\nwindow_size = 0\n").unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "engine.window_size",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let err = parse_dashboard_config("[engine]\ntick_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("engine.tick_interval_ms"));
    }
}
