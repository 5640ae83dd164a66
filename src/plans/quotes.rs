// ABOUTME: Motivational quote generation with a static fallback
// ABOUTME: Strips double quotes from model output and never returns an empty quote
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::warn;

use crate::constants::quotes::FALLBACK_QUOTE;
use crate::llm::prompts::QUOTE_PROMPT;
use crate::llm::{CompletionRequest, LlmProvider};

/// Normalize a model answer into a quote, `None` if nothing is left
#[must_use]
pub fn clean_quote(raw: &str) -> Option<String> {
    let quote = raw.trim().replace('"', "");
    let quote = quote.trim();
    (!quote.is_empty()).then(|| quote.to_owned())
}

/// Ask `llm` for a quote; any failure yields [`FALLBACK_QUOTE`]
pub async fn motivational_quote(llm: Option<&dyn LlmProvider>) -> String {
    let Some(llm) = llm else {
        return FALLBACK_QUOTE.to_owned();
    };

    let request = CompletionRequest::new(QUOTE_PROMPT);
    match llm.complete(&request).await {
        Ok(response) => clean_quote(&response.content).unwrap_or_else(|| {
            warn!("Model returned an empty quote");
            FALLBACK_QUOTE.to_owned()
        }),
        Err(e) => {
            warn!(error = %e, "Quote request failed");
            FALLBACK_QUOTE.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_quote_strips_double_quotes() {
        assert_eq!(
            clean_quote("  \"Strong today, stronger tomorrow.\"\n").as_deref(),
            Some("Strong today, stronger tomorrow.")
        );
    }

    #[test]
    fn test_clean_quote_rejects_blank() {
        assert!(clean_quote(" \"\" ").is_none());
    }

    #[tokio::test]
    async fn test_missing_provider_uses_fallback() {
        assert_eq!(motivational_quote(None).await, FALLBACK_QUOTE);
    }
}
