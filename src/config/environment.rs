// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a validated, strongly typed ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Environment-based configuration management

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::types::LlmProviderType;
use crate::constants::network::{DEFAULT_HOST, DEFAULT_HTTP_PORT};
use crate::llm::{GEMINI_DEFAULT_MODEL, LOCAL_DEFAULT_BASE_URL, LOCAL_DEFAULT_MODEL};

/// Default database location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/fitplan.db";

/// Default upper bound for one LLM request
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` URLs or an empty path.
    pub fn parse_url(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            bail!("Only SQLite databases are supported, got {s}");
        }

        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        let path_str = path_str.split('?').next().unwrap_or_default();

        match path_str {
            "" => Err(anyhow!("DATABASE_URL must not be empty")),
            ":memory:" => Ok(Self::Memory),
            path => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
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
        Self::SQLite {
            path: PathBuf::from("./data/fitplan.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
    /// LLM backend settings
    pub llm: LlmConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Cross-origin resource sharing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; a single `*` allows any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Whether every origin is allowed
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// LLM backend configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Which provider to construct
    pub provider: LlmProviderType,
    /// Gemini API key
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
    /// Gemini default model
    pub gemini_model: String,
    /// Base URL of the `OpenAI`-compatible server
    pub local_base_url: String,
    /// Model served by the `OpenAI`-compatible server
    pub local_model: String,
    /// Optional API key for the `OpenAI`-compatible server
    #[serde(skip_serializing)]
    pub local_api_key: Option<String>,
    /// Model override for option generation
    pub options_model: Option<String>,
    /// Model override for plan generation
    pub plan_model: Option<String>,
    /// Overall timeout for one LLM request, in seconds
    pub request_timeout_secs: u64,
}

impl LlmConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn from_env() -> Result<Self> {
        Ok(Self {
            provider: env::var(LlmProviderType::ENV_VAR)
                .map(|s| LlmProviderType::from_str_or_default(&s))
                .unwrap_or_default(),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: env_var_or("GEMINI_MODEL", GEMINI_DEFAULT_MODEL),
            local_base_url: env_var_or("LOCAL_LLM_BASE_URL", LOCAL_DEFAULT_BASE_URL),
            local_model: env_var_or("LOCAL_LLM_MODEL", LOCAL_DEFAULT_MODEL),
            local_api_key: non_empty_var("LOCAL_LLM_API_KEY"),
            options_model: non_empty_var("FITPLAN_OPTIONS_MODEL"),
            plan_model: non_empty_var("FITPLAN_PLAN_MODEL"),
            request_timeout_secs: env_var_or(
                "LLM_REQUEST_TIMEOUT_SECS",
                &DEFAULT_LLM_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid LLM_REQUEST_TIMEOUT_SECS value")?,
        })
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderType::default(),
            gemini_api_key: None,
            gemini_model: GEMINI_DEFAULT_MODEL.to_owned(),
            local_base_url: LOCAL_DEFAULT_BASE_URL.to_owned(),
            local_model: LOCAL_DEFAULT_MODEL.to_owned(),
            local_api_key: None,
            options_model: None,
            plan_model: None,
            request_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("local_base_url", &self.local_base_url)
            .field("local_model", &self.local_model)
            .field(
                "local_api_key",
                &self.local_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("options_model", &self.options_model)
            .field("plan_model", &self.plan_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            http_port: DEFAULT_HTTP_PORT,
            database: DatabaseConfig {
                url: DatabaseUrl::default(),
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_owned()],
            },
            llm: LlmConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result fails validation.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            host: env_var_or("HOST", DEFAULT_HOST),
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))
                    .context("Invalid DATABASE_URL value")?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
            },
            llm: LlmConfig::from_env()?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for port 0, a zero LLM timeout, or Gemini without an API key.
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            bail!("HTTP_PORT must be between 1 and 65535");
        }

        if self.llm.request_timeout_secs == 0 {
            bail!("LLM_REQUEST_TIMEOUT_SECS must be greater than zero");
        }

        if self.llm.provider == LlmProviderType::Gemini && self.llm.gemini_api_key.is_none() {
            bail!(
                "GEMINI_API_KEY is required when {} is gemini",
                LlmProviderType::ENV_VAR
            );
        }

        if self.database.url.is_memory() {
            warn!("Using an in-memory database; data is lost on restart");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let model = match self.llm.provider {
            LlmProviderType::Gemini => &self.llm.gemini_model,
            LlmProviderType::Local => &self.llm.local_model,
        };
        format!(
            "FitPlan Server Configuration:\n\
             - Listen: {}:{}\n\
             - Database: {}\n\
             - CORS Origins: {}\n\
             - LLM Provider: {} (model {}, timeout {}s)",
            self.host,
            self.http_port,
            self.database.url,
            self.cors.allowed_origins.join(", "),
            self.llm.provider,
            model,
            self.llm.request_timeout_secs,
        )
    }
}

/// Read an environment variable with a default
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Read an environment variable, treating blank values as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse comma-separated origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    origins_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}
