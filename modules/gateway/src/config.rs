use std::env;

use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// When both are present, an admin account is bootstrapped at startup.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),

    #[error("environment variable {0} has an invalid value")]
    Invalid(&'static str),
}

const DEFAULT_PORT: u16 = 5000;

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => {
                info!("PORT not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        Ok(Self {
            port,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            admin_name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_owned()),
        })
    }
}
