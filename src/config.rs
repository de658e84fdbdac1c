//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DB_HOST` (optional): PostgreSQL host, defaults to localhost
/// - `DB_PORT` (optional): PostgreSQL port, defaults to 5432
/// - `DB_NAME` (required): database name
/// - `DB_USER` (required): database user
/// - `DB_PASSWORD` (required): database password
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_host")]
    pub db_host: String,

    #[serde(default = "default_db_port")]
    pub db_port: u16,

    pub db_name: String,

    pub db_user: String,

    pub db_password: String,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

/// Default database host if DB_HOST is not set.
fn default_db_host() -> String {
    "localhost".to_string()
}

/// Default database port if DB_PORT is not set.
fn default_db_port() -> u16 {
    5432
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// Configuration is read exactly once, at process startup; missing
    /// `DB_NAME`, `DB_USER` or `DB_PASSWORD` is a fatal error raised here,
    /// before any connection is opened.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (DB_NAME, DB_USER, DB_PASSWORD)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: db_name -> DB_NAME
        envy::from_env::<Config>()
    }
}
