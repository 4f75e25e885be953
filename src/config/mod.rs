//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `JIRA_SHERPA`
//! prefix and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use jira_sherpa::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod jira;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use jira::JiraConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Intent extractor configuration (Gemini API)
    #[serde(default)]
    pub ai: AiConfig,

    /// Jira tracker configuration
    #[serde(default)]
    pub jira: JiraConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (development), then reads environment
    /// variables of the form `JIRA_SHERPA__SECTION__KEY`:
    ///
    /// - `JIRA_SHERPA__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `JIRA_SHERPA__AI__API_KEY=...`   -> `ai.api_key = ...`
    /// - `JIRA_SHERPA__JIRA__BASE_URL=...` -> `jira.base_url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("JIRA_SHERPA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate(&self.server.environment)?;
        self.jira.validate()?;
        Ok(())
    }

    /// Check if running in production environment.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sections_validate_in_development() {
        let config = AppConfig {
            server: ServerConfig::default(),
            ai: AiConfig::default(),
            jira: JiraConfig::default(),
        };
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
    }

    #[test]
    fn production_without_ai_key_fails_validation() {
        let mut config = AppConfig {
            server: ServerConfig::default(),
            ai: AiConfig::default(),
            jira: JiraConfig::default(),
        };
        config.server.environment = Environment::Production;
        assert!(config.validate().is_err());
    }
}
