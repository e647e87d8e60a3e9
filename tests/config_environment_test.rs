// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Covers defaults, overrides, validation failures, and database URL parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use fitplan_server::config::{DatabaseUrl, LlmProviderType, ServerConfig};
use serial_test::serial;

const MANAGED_VARS: &[&str] = &[
    "HOST",
    "HTTP_PORT",
    "DATABASE_URL",
    "CORS_ALLOWED_ORIGINS",
    "FITPLAN_LLM_PROVIDER",
    "GEMINI_API_KEY",
    "GEMINI_MODEL",
    "LOCAL_LLM_BASE_URL",
    "LOCAL_LLM_MODEL",
    "LOCAL_LLM_API_KEY",
    "FITPLAN_OPTIONS_MODEL",
    "FITPLAN_PLAN_MODEL",
    "LLM_REQUEST_TIMEOUT_SECS",
];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_with_gemini_key() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "key-123");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.llm.provider, LlmProviderType::Gemini);
    assert_eq!(config.llm.gemini_model, "gemini-2.5-flash");
    assert_eq!(config.llm.request_timeout_secs, 120);
    assert!(config.cors.allows_any_origin());
    assert_eq!(
        config.database.url,
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/fitplan.db")
        }
    );

    clear_env();
}

#[test]
#[serial]
fn test_missing_gemini_key_is_rejected() {
    clear_env();
    let err = ServerConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("GEMINI_API_KEY"));
}

#[test]
#[serial]
fn test_blank_gemini_key_counts_as_missing() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "   ");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_local_provider_overrides() {
    clear_env();
    env::set_var("FITPLAN_LLM_PROVIDER", "ollama");
    env::set_var("LOCAL_LLM_MODEL", "llama3.1:8b-instruct");
    env::set_var("FITPLAN_PLAN_MODEL", "llama3.3:70b-instruct");
    env::set_var("HTTP_PORT", "9090");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://fitplan.app");
    env::set_var("LLM_REQUEST_TIMEOUT_SECS", "45");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.llm.provider, LlmProviderType::Local);
    assert_eq!(config.llm.local_model, "llama3.1:8b-instruct");
    assert_eq!(config.llm.plan_model.as_deref(), Some("llama3.3:70b-instruct"));
    assert!(config.llm.options_model.is_none());
    assert_eq!(config.http_port, 9090);
    assert!(config.database.url.is_memory());
    assert_eq!(
        config.cors.allowed_origins,
        vec!["http://localhost:3000", "https://fitplan.app"]
    );
    assert!(!config.cors.allows_any_origin());
    assert_eq!(config.llm.request_timeout().as_secs(), 45);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("FITPLAN_LLM_PROVIDER", "local");

    env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());

    env::set_var("HTTP_PORT", "0");
    assert!(ServerConfig::from_env().is_err());

    env::set_var("HTTP_PORT", "8081");
    env::set_var("LLM_REQUEST_TIMEOUT_SECS", "0");
    assert!(ServerConfig::from_env().is_err());

    env::remove_var("LLM_REQUEST_TIMEOUT_SECS");
    env::set_var("DATABASE_URL", "postgres://localhost/fitplan");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(DatabaseUrl::parse_url(":memory:").unwrap(), DatabaseUrl::Memory);
    assert_eq!(
        DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
        DatabaseUrl::Memory
    );
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:///var/lib/fitplan.db?mode=rwc").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("/var/lib/fitplan.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("data/local.db")
            .unwrap()
            .to_connection_string(),
        "sqlite:data/local.db"
    );
    assert!(DatabaseUrl::parse_url("sqlite:").is_err());
    assert!(DatabaseUrl::parse_url("postgresql://db/fitplan").is_err());
}

#[test]
fn test_summary_omits_secrets() {
    let mut config = ServerConfig::default();
    config.llm.gemini_api_key = Some("super-secret".to_owned());

    assert!(config.validate().is_ok());
    assert!(!config.summary().contains("super-secret"));
    assert!(!format!("{config:?}").contains("super-secret"));
}
