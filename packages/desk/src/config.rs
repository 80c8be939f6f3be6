use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// How the gate decides whether a scan is an entry or an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionSource {
    /// In-process toggle set, reset on restart (legacy desk behavior).
    Volatile,
    /// Derived from the member's most recent event today in the store.
    Derived,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub db_pool_size: u32,
    pub direction_source: DirectionSource,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_from_number: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let direction_source = match env::var("DESK_DIRECTION_SOURCE")
            .unwrap_or_else(|_| "volatile".to_string())
            .to_lowercase()
            .as_str()
        {
            "volatile" => DirectionSource::Volatile,
            "derived" => DirectionSource::Derived,
            other => anyhow::bail!(
                "DESK_DIRECTION_SOURCE must be 'volatile' or 'derived', got '{other}'"
            ),
        };

        Ok(Self {
            db_host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            db_port: env::var("DB_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .context("DB_PORT must be a valid port number")?,
            db_name: env::var("DB_NAME").unwrap_or_else(|_| "gymdesk".to_string()),
            db_user: env::var("DB_USER").context("DB_USER must be set")?,
            db_password: env::var("DB_PASSWORD").context("DB_PASSWORD must be set")?,
            db_pool_size: env::var("DB_POOL_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DB_POOL_SIZE must be a valid number")?,
            direction_source,
            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID").ok(),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN").ok(),
            twilio_from_number: env::var("TWILIO_FROM_NUMBER").ok(),
        })
    }

    /// Postgres connection URL assembled from the component settings.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }
}
