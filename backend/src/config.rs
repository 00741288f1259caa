//! Configuration management for the Coffee Tasting API
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides (`DATABASE_URL`, `CORS_ORIGINS`, ...)

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// Origins allowed when `CORS_ORIGINS` is not set
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:8080,http://localhost:5173";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, testing, production)
    pub environment: String,
    pub debug: bool,
    pub log_level: String,

    // Server
    pub host: String,
    pub port: u16,

    // Database
    pub database_url: Option<String>,
    pub database_url_test: Option<String>,
    pub database_max_connections: u32,
    pub database_min_connections: u32,

    // Supabase
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub supabase_service_role_key: Option<String>,
    /// HS256 secret Supabase signs access tokens with
    pub supabase_jwt_secret: Option<String>,

    // API
    pub api_v1_str: String,
    pub project_name: String,
    pub version: String,
    /// Comma-separated list or JSON array
    pub cors_origins: String,

    // Security
    pub secret_key: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64,

    // Rate limiting
    /// Requests allowed per period; 0 disables the limit
    pub rate_limit_requests: u64,
    /// Period length in seconds
    pub rate_limit_period: u64,

    // Preference analysis
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Self::defaults(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with plain environment variables
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Defaults with explicit overrides applied on top; ignores files and
    /// the process environment.
    pub fn with_overrides<'a>(
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults("development")?;
        for (key, value) in overrides {
            builder = builder.set_override(key, value)?;
        }
        builder.build()?.try_deserialize()
    }

    fn defaults(environment: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("debug", false)?
            .set_default("log_level", "INFO")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("database_max_connections", 10)?
            .set_default("database_min_connections", 2)?
            .set_default("api_v1_str", "/api/v1")?
            .set_default("project_name", "Coffee Tasting API")?
            .set_default("version", "0.1.0")?
            .set_default("cors_origins", DEFAULT_CORS_ORIGINS)?
            .set_default("secret_key", "dev-secret-key-change-in-production")?
            .set_default("algorithm", "HS256")?
            .set_default("access_token_expire_minutes", 30)?
            .set_default("rate_limit_requests", 100)?
            .set_default("rate_limit_period", 60)?
            .set_default("openai_base_url", "https://api.openai.com/v1")?
            .set_default("openai_model", "gpt-4o-mini")
    }

    pub fn is_development(&self) -> bool {
        matches!(
            self.environment.to_lowercase().as_str(),
            "development" | "dev" | "local"
        )
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }

    pub fn is_testing(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "testing" | "test")
    }

    /// Secret used to verify access tokens
    pub fn jwt_secret(&self) -> &str {
        self.supabase_jwt_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.secret_key)
    }

    /// Database URL for the current environment
    pub fn database_url_for_environment(&self) -> Option<&str> {
        let test_url = self
            .database_url_test
            .as_deref()
            .filter(|_| self.is_testing());

        test_url
            .or(self.database_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Parsed CORS origins
    pub fn cors_origin_list(&self) -> Vec<String> {
        parse_origins(&self.cors_origins)
    }

    /// Preference analysis API key, if configured
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Accepts `a,b,c` or `["a","b","c"]`
pub fn parse_origins(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
            return list
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
    }

    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
