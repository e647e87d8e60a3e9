// ABOUTME: Configuration type definitions shared by the server configuration
// ABOUTME: Contains the LlmProviderType enum selecting which LLM backend generates content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// LLM backend used by the option and plan generators
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// Google Gemini via the Generative Language API (default)
    #[default]
    Gemini,
    /// Local LLM provider - `OpenAI`-compatible endpoint (Ollama, vLLM, `LocalAI`)
    Local,
}

impl LlmProviderType {
    /// Environment variable name for LLM provider selection
    pub const ENV_VAR: &'static str = "FITPLAN_LLM_PROVIDER";

    /// Parse from string with fallback to default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "local" | "ollama" | "vllm" | "localai" => Self::Local,
            _ => Self::Gemini,
        }
    }
}

impl Display for LlmProviderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Local => write!(f, "local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_aliases() {
        assert_eq!(
            LlmProviderType::from_str_or_default("Ollama"),
            LlmProviderType::Local
        );
        assert_eq!(
            LlmProviderType::from_str_or_default("vllm"),
            LlmProviderType::Local
        );
        assert_eq!(
            LlmProviderType::from_str_or_default("google"),
            LlmProviderType::Gemini
        );
        assert_eq!(
            LlmProviderType::from_str_or_default(""),
            LlmProviderType::Gemini
        );
        assert_eq!(LlmProviderType::Local.to_string(), "local");
    }
}
