use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 12;

/// Application configuration loaded from environment variables.
/// Only `JWT_SECRET` is required; every third-party integration is optional
/// and the corresponding feature degrades to its offline behaviour when unset.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. `None` runs the service on in-memory stores.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub admin_email: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub openai_model: String,
    pub provider_timeout: Duration,
    pub job_api: Option<JobApiConfig>,
    /// Allowed CORS origins. Empty means permissive.
    pub cors_allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

/// Credentials for the external job-search provider. Present only when all
/// three of URL, app id and app key are set.
#[derive(Debug, Clone)]
pub struct JobApiConfig {
    pub base_url: String,
    pub app_id: String,
    pub app_key: String,
    pub country: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider_timeout = match optional_env("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            jwt_secret: require_env("JWT_SECRET")?,
            admin_email: optional_env("ADMIN_EMAIL").map(|e| e.to_lowercase()),
            openai_api_key: optional_env("OPENAI_API_KEY").or_else(|| optional_env("OPENAI")),
            openai_api_url: optional_env("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),
            openai_model: optional_env("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            provider_timeout: Duration::from_secs(provider_timeout),
            job_api: job_api_from_env(),
            cors_allowed_origins: optional_env("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// True when `email` is the configured administrator address.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_email
            .as_deref()
            .is_some_and(|admin| admin.eq_ignore_ascii_case(email))
    }
}

fn job_api_from_env() -> Option<JobApiConfig> {
    Some(JobApiConfig {
        base_url: optional_env("JOB_API_URL")?
            .trim_end_matches('/')
            .to_string(),
        app_id: optional_env("JOB_API_APP_ID")?,
        app_key: optional_env("JOB_API_APP_KEY")?,
        country: optional_env("JOB_API_COUNTRY").unwrap_or_else(|| "in".to_string()),
    })
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an env var, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
