//! # press-config
//!
//! Layered configuration loading for Pressroom using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PRESS_*` prefix, `__` as separator)
//! 2. Project-level `.press/config.toml`
//! 3. User-level `~/.config/press/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PRESS_GEMINI__API_KEY` -> `gemini.api_key`,
//! `PRESS_COMMUNITY__NAME` -> `community.name`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use press_config::PressConfig;
//!
//! let config = PressConfig::load_with_dotenv().expect("config");
//! if config.gemini.is_configured() {
//!     println!("model: {}", config.gemini.model);
//! }
//! ```

mod cleaner;
mod community;
mod error;
mod gemini;
mod relay;
mod session;
mod store;

pub use cleaner::CleanerConfig;
pub use community::CommunityConfig;
pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use relay::RelayConfig;
pub use session::SessionConfig;
pub use store::{StoreBackend, StoreConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PressConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub community: CommunityConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cleaner: CleanerConfig,
}

impl PressConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".press/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PRESS_").split("__"))
    }

    /// Reject values that would make the workflow misbehave rather than fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.community.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "community.name",
                reason: "must not be empty",
            });
        }
        if self.community.idea_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "community.idea_count",
                reason: "must be at least 1",
            });
        }
        if self.session.user_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "session.user_id",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Fail unless the generative-text API has credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `gemini` section.
    pub fn require_gemini(&self) -> Result<&GeminiConfig, ConfigError> {
        if self.gemini.is_configured() {
            Ok(&self.gemini)
        } else {
            Err(ConfigError::NotConfigured {
                section: "gemini",
                env_key: "PRESS_GEMINI__API_KEY",
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("press").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = PressConfig::default();
        assert!(!config.gemini.is_configured());
        assert!(config.relay.is_configured());
        assert_eq!(config.community.name, "growmybusinessnow");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.cleaner.strip_title);
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(PressConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_idea_count_is_invalid() {
        let mut config = PressConfig::default();
        config.community.idea_count = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "community.idea_count",
                ..
            }
        ));
    }

    #[test]
    fn require_gemini_reports_section() {
        let err = PressConfig::default().require_gemini().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { section: "gemini", .. }));
        assert_eq!(
            err.to_string(),
            "[gemini] has no credentials; set PRESS_GEMINI__API_KEY or add them to .press/config.toml"
        );
    }

    #[test]
    fn invalid_value_names_the_field() {
        let mut config = PressConfig::default();
        config.session.user_id = "  ".into();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "session.user_id must not be empty");
    }
}
