//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The configuration file path defaults to `config.yaml` but can
//! be specified via `-f` flag or the `VOLONTERRO_CONFIG` environment
//! variable.
//!
//! ## Loading Priority
//!
//! Sources are merged in order (later sources override earlier ones):
//!
//! 1. **YAML config file** - base configuration (default: `config.yaml`)
//! 2. **Environment variables** - variables prefixed with `VOLONTERRO_`
//! 3. **DATABASE_URL** - special case: overrides `database.url` when set
//!
//! Nested values use double underscores, e.g.
//! `VOLONTERRO_AUTH__COOKIE_NAME=Volonterro-Access-Token`.

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

/// Simple CLI args - just for specifying the config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "VOLONTERRO_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Secret key for verifying access tokens (required)
    pub secret_key: Option<String>,
    /// Access-token verification settings
    pub auth: AuthConfig,
    /// Reference rows written once on startup
    pub seed: SeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database: DatabaseConfig::default(),
            secret_key: None,
            auth: AuthConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Cookie carrying the access token for browser clients
    pub cookie_name: String,
    /// Lifetime of tokens signed by local tooling
    pub jwt_expiry_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "Volonterro-Access-Token".to_string(),
            jwt_expiry_seconds: 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// User roles guaranteed to exist after startup
    pub roles: Vec<String>,
    /// Registration methods guaranteed to exist after startup
    pub registration_methods: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            roles: vec!["Default".to_string(), "Volunteer".to_string(), "Administrator".to_string()],
            registration_methods: vec!["Google".to_string(), "Facebook".to_string(), "Discord".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from the YAML file and environment overrides
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        // DATABASE_URL wins over everything, the way deploy tooling expects
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        config.validate().map_err(figment::Error::from)?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("VOLONTERRO_").split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), String> {
        if self.secret_key.as_deref().is_none_or(str::is_empty) {
            return Err("secret_key must be configured".to_string());
        }
        if self.database.url.is_empty() {
            return Err("database.url (or DATABASE_URL) must be configured".to_string());
        }
        Ok(())
    }
}
