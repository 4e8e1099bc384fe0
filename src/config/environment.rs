// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into typed server, auth, LLM and upload sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, generation, http, limits};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite { path: PathBuf },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// Accepts `sqlite:<path>`, `sqlite::memory:` or a bare file path.
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:")).unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DEFAULT_DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Path every API route is nested under
    pub base_path: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Plan generation (LLM) configuration
    pub llm: LlmConfig,
    /// Photo upload configuration
    pub uploads: UploadConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// Persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Token signing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing tokens; generated at startup when absent
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

/// Chat-completions provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; generation always falls back when absent
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Chat-completions base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token ceiling
    pub max_tokens: u32,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: generation::DEFAULT_OPENAI_BASE_URL.to_owned(),
            model: generation::DEFAULT_OPENAI_MODEL.to_owned(),
            temperature: generation::DEFAULT_TEMPERATURE,
            max_tokens: generation::DEFAULT_MAX_TOKENS,
            request_timeout_secs: generation::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Photo upload settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory photos are written to
    pub directory: PathBuf,
    /// Maximum request body size in bytes
    pub max_bytes: usize,
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or `*`
    pub allowed_origins: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());

        Ok(Self {
            http_port: var_or("HTTP_PORT", &http::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            base_path: normalize_base_path(&var_or("FITCOACH_BASE_PATH", http::DEFAULT_BASE_PATH)),
            environment: Environment::from_str_or_default(&var_or("ENVIRONMENT", "development")),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&var_or("DATABASE_URL", defaults::DEFAULT_DATABASE_URL)),
            },
            auth: AuthConfig {
                jwt_secret: var("JWT_SECRET"),
                jwt_expiry_hours: var_or(
                    "JWT_EXPIRY_HOURS",
                    &limits::DEFAULT_JWT_EXPIRY_HOURS.to_string(),
                )
                .parse()
                .context("Invalid JWT_EXPIRY_HOURS value")?,
            },
            llm: LlmConfig {
                api_key: var("OPENAI_API_KEY"),
                base_url: var_or("OPENAI_BASE_URL", generation::DEFAULT_OPENAI_BASE_URL),
                model: var_or("OPENAI_MODEL", generation::DEFAULT_OPENAI_MODEL),
                temperature: var_or("LLM_TEMPERATURE", &generation::DEFAULT_TEMPERATURE.to_string())
                    .parse()
                    .context("Invalid LLM_TEMPERATURE value")?,
                max_tokens: var_or("LLM_MAX_TOKENS", &generation::DEFAULT_MAX_TOKENS.to_string())
                    .parse()
                    .context("Invalid LLM_MAX_TOKENS value")?,
                request_timeout_secs: var_or(
                    "LLM_REQUEST_TIMEOUT_SECS",
                    &generation::DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid LLM_REQUEST_TIMEOUT_SECS value")?,
            },
            uploads: UploadConfig {
                directory: PathBuf::from(var_or("UPLOAD_DIR", defaults::DEFAULT_UPLOAD_DIR)),
                max_bytes: var_or(
                    "UPLOAD_MAX_BYTES",
                    &limits::DEFAULT_UPLOAD_MAX_BYTES.to_string(),
                )
                .parse()
                .context("Invalid UPLOAD_MAX_BYTES value")?,
            },
            cors: CorsConfig {
                allowed_origins: var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("HTTP_PORT must be non-zero"));
        }

        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(anyhow!("FITCOACH_BASE_PATH must be empty or start with '/'"));
        }

        if !(1..=limits::MAX_JWT_EXPIRY_HOURS).contains(&self.auth.jwt_expiry_hours) {
            return Err(anyhow!(
                "JWT_EXPIRY_HOURS must be between 1 and {}",
                limits::MAX_JWT_EXPIRY_HOURS
            ));
        }

        if self.environment.is_production() && self.auth.jwt_secret.is_none() {
            return Err(anyhow!("JWT_SECRET is required in production"));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(anyhow!("LLM_TEMPERATURE must be between 0.0 and 2.0"));
        }

        if self.llm.max_tokens == 0 {
            return Err(anyhow!("LLM_MAX_TOKENS must be positive"));
        }

        if self.llm.api_key.is_none() {
            warn!("OPENAI_API_KEY is not set; every workout will use the default plan");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitCoach Server Configuration:\n\
             - HTTP Port: {}\n\
             - Base Path: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - JWT Secret: {}\n\
             - Token Lifetime: {}h\n\
             - LLM: {} ({})\n\
             - Upload Dir: {}\n\
             - CORS Origins: {}",
            self.http_port,
            self.base_path,
            self.environment,
            self.database.url,
            if self.auth.jwt_secret.is_some() {
                "Configured"
            } else {
                "Generated (tokens reset on restart)"
            },
            self.auth.jwt_expiry_hours,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.uploads.directory.display(),
            self.cors.allowed_origins,
        )
    }
}

/// Ensure a single leading slash and no trailing slash
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
