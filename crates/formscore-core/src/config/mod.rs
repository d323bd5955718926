//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod auth;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `FORMSCORE__`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment: `"development"`, `"staging"`, `"production"`.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `FORMSCORE`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FORMSCORE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        if app_config.environment.is_empty() {
            app_config.environment = env.to_string();
        }

        Ok(app_config)
    }

    /// Whether this configuration targets a production deployment.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Validate critical configuration values.
    ///
    /// Returns the first violation found. The insecure default signing
    /// secret is rejected in any non-development environment.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.environment != "development"
            && self.auth.token_signing_secret == auth::INSECURE_DEFAULT_SECRET
        {
            return Err(AppError::configuration(
                "auth.token_signing_secret must be set outside development",
            ));
        }

        if !(10..=15).contains(&self.auth.password_work_factor) {
            return Err(AppError::configuration(format!(
                "auth.password_work_factor must be between 10 and 15 (got {})",
                self.auth.password_work_factor
            )));
        }

        if self.auth.min_password_length < 8 {
            return Err(AppError::configuration(format!(
                "auth.min_password_length must be at least 8 (got {})",
                self.auth.min_password_length
            )));
        }

        if self.auth.access_token_ttl_hours < 1 {
            return Err(AppError::configuration(
                "auth.access_token_ttl_hours must be at least 1",
            ));
        }

        if self.auth.refresh_token_ttl_days < 1 {
            return Err(AppError::configuration(
                "auth.refresh_token_ttl_days must be at least 1",
            ));
        }

        Ok(())
    }
}

fn default_environment() -> String {
    "development".to_string()
}
