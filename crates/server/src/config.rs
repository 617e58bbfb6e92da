use log::{info, warn};
use std::{env, fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Runtime settings, read from the environment once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    pub admin_email: String,
    pub admin_password: Option<String>,
    pub seed_demo_data: bool,
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_model: String,
    pub cors_allowed_origin: String,
}

impl Config {
    /// Loads `.env` if present, then reads every setting
    pub fn load() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_err() {
            info!("No .env file found, reading the process environment only");
        }

        let config = Self {
            database_url: required("DATABASE_URL")?,
            port: try_load("PORT", "3000")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration_minutes: try_load("JWT_EXPIRATION_MINUTES", "1440")?,
            admin_email: try_load("ADMIN_EMAIL", "admin@restaurant.com")?,
            admin_password: optional("ADMIN_PASSWORD"),
            seed_demo_data: try_load("SEED_DEMO_DATA", "true")?,
            stripe_secret_key: optional("STRIPE_SECRET_KEY"),
            stripe_api_base: try_load("STRIPE_API_BASE", "https://api.stripe.com")?,
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_api_base: try_load("OPENAI_API_BASE", "https://api.openai.com")?,
            openai_model: try_load("OPENAI_MODEL", "gpt-4o-mini")?,
            cors_allowed_origin: try_load("CORS_ALLOWED_ORIGIN", "*")?,
        };

        if config.seed_demo_data && config.admin_password.is_none() {
            return Err(ConfigError::Missing("ADMIN_PASSWORD"));
        }

        Ok(config)
    }
}

/// Unset and empty are treated the same
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = optional(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            message: e.to_string(),
        }
    })
}
