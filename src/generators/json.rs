// ABOUTME: Extraction and parsing of JSON documents from free-form LLM replies
// ABOUTME: Strips markdown fences and maps parse failures to InvalidResponseShape with details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::warn;

use crate::errors::{AppError, AppResult};

/// Longest reply excerpt echoed back in error details
const EXCERPT_CHARS: usize = 200;

/// Remove a surrounding markdown code fence such as ```` ```json ... ``` ````
#[must_use]
pub fn strip_markdown_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) on the opening line
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Narrow a reply to the outermost JSON object when prose surrounds it
fn outermost_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Parse an LLM reply into `T`
///
/// # Errors
///
/// Returns `InvalidResponseShape` with the parser position and a reply excerpt when the
/// reply is not valid JSON for `T`.
pub fn parse_reply<T: DeserializeOwned>(reply: &str, what: &str) -> AppResult<T> {
    let candidate = outermost_object(strip_markdown_fences(reply));

    serde_json::from_str(candidate).map_err(|e| {
        warn!(
            target_type = what,
            line = e.line(),
            column = e.column(),
            "LLM reply did not match expected shape: {e}"
        );
        AppError::invalid_response_shape(format!("Generated {what} could not be parsed"))
            .with_details(json!({
                "error": e.to_string(),
                "line": e.line(),
                "column": e.column(),
                "excerpt": candidate.chars().take(EXCERPT_CHARS).collect::<String>(),
            }))
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::errors::ErrorCode;

    #[derive(Debug, Deserialize)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn test_fence_stripping() {
        assert_eq!(strip_markdown_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_markdown_fences("```\n{}\n```\n"), "{}");
        assert_eq!(strip_markdown_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_tolerates_surrounding_prose() {
        let sample: Sample =
            parse_reply("Here you go:\n```json\n{\"value\": 4}\n```", "sample").unwrap();
        assert_eq!(sample.value, 4);

        let sample: Sample = parse_reply("Sure! {\"value\": 9} Enjoy.", "sample").unwrap();
        assert_eq!(sample.value, 9);
    }

    #[test]
    fn test_parse_failure_carries_details() {
        let err = parse_reply::<Sample>("{\"value\": \"four\"}", "sample").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidResponseShape);
        let details = err.details.unwrap();
        assert_eq!(details["line"], 1);
        assert!(details["excerpt"].as_str().unwrap().contains("four"));
    }
}
