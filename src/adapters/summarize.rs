//! Summarization sidecar client with internal chunking.
//!
//! Inputs beyond a chunking threshold are split into sentence chunks that
//! fit the model's context budget; each chunk is summarized, and a final
//! pass runs over the concatenated chunk summaries.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::Summary;

use super::{CollaboratorError, Summarizer, SummaryOptions};

/// Inputs longer than this (in chars) are chunked before summarization
const CHUNK_THRESHOLD_CHARS: usize = 1024;

/// Approximate token budget per chunk
const CHUNK_TOKEN_BUDGET: usize = 800;

/// HTTP client for the summarization sidecar
pub struct HttpSummarizer {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    text: &'a str,
    max_length: usize,
    min_length: usize,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

impl HttpSummarizer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// Single summarization call, no chunking
    async fn summarize_chunk(&self, text: &str, options: SummaryOptions) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/summarize", self.endpoint.trim_end_matches('/')))
            .json(&SummarizeRequest {
                text,
                max_length: options.max_length,
                min_length: options.min_length,
            })
            .send()
            .await
            .map_err(CollaboratorError::Http)?;

        if !response.status().is_success() {
            return Err(CollaboratorError::Payload(format!(
                "summarizer returned status {}",
                response.status()
            ))
            .into());
        }

        let parsed: SummarizeResponse = response.json().await.map_err(CollaboratorError::Http)?;
        Ok(parsed.summary)
    }

    /// Chunk, summarize each chunk, then summarize the concatenation
    async fn summarize_long(&self, text: &str, options: SummaryOptions) -> Result<String> {
        let chunks = split_into_chunks(text, CHUNK_TOKEN_BUDGET);
        info!(chunks = chunks.len(), "Split long input into chunks");

        let per_chunk = SummaryOptions {
            max_length: (options.max_length / chunks.len().max(1)).max(options.min_length),
            min_length: options.min_length,
        };

        let mut chunk_summaries = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            debug!(chunk = i + 1, total = chunks.len(), "Summarizing chunk");
            chunk_summaries.push(self.summarize_chunk(chunk, per_chunk).await?);
        }

        let combined = chunk_summaries.join(" ");
        self.summarize_chunk(&combined, options).await
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    fn name(&self) -> &str {
        "http-summarizer"
    }

    async fn summarize(&self, text: &str, options: SummaryOptions) -> Result<Summary> {
        info!(length = text.len(), "Summarizing text");

        let summary = if text.len() > CHUNK_THRESHOLD_CHARS {
            self.summarize_long(text, options).await?
        } else {
            self.summarize_chunk(text, options).await?
        };

        Ok(build_summary(text, summary))
    }
}

/// Assemble the summary record with length accounting
fn build_summary(original: &str, summary: String) -> Summary {
    let original_length = original.len();
    let summary_length = summary.len();
    let compression_ratio = if summary_length > 0 {
        ((original_length as f64 / summary_length as f64) * 100.0).round() / 100.0
    } else {
        0.0
    };

    Summary {
        summary,
        original_length,
        summary_length,
        compression_ratio,
    }
}

/// Greedy sentence packing: split on ". " and accumulate sentences until
/// the approximate token budget is reached
fn split_into_chunks(text: &str, token_budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_tokens = 0usize;

    for sentence in text.split(". ") {
        let sentence_tokens = approx_tokens(sentence);
        if current_tokens + sentence_tokens > token_budget && !current.is_empty() {
            chunks.push(current.join(". "));
            current = vec![sentence];
            current_tokens = sentence_tokens;
        } else {
            current.push(sentence);
            current_tokens += sentence_tokens;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(". "));
    }

    chunks
}

/// Rough token estimate (whitespace-separated words)
fn approx_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split_into_chunks("One sentence. Another sentence.", 800);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], "One sentence. Another sentence.");
    }

    #[test]
    fn test_long_text_splits_at_budget() {
        let sentence = "word ".repeat(300).trim_end().to_string();
        let text = format!("{s}. {s}. {s}.", s = sentence);

        let chunks = split_into_chunks(&text, 800);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            // No chunk wildly exceeds the budget (one sentence overshoot allowed)
            assert!(approx_tokens(chunk) <= 800);
        }
    }

    #[test]
    fn test_chunks_preserve_all_words() {
        let text = "Alpha beta. Gamma delta. Epsilon zeta.";
        let chunks = split_into_chunks(text, 3);

        let rejoined = chunks.join(". ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn test_build_summary_ratio() {
        let summary = build_summary("x".repeat(100).as_str(), "y".repeat(25));
        assert_eq!(summary.original_length, 100);
        assert_eq!(summary.summary_length, 25);
        assert_eq!(summary.compression_ratio, 4.0);
    }

    #[test]
    fn test_build_summary_empty_guard() {
        let summary = build_summary("input", String::new());
        assert_eq!(summary.compression_ratio, 0.0);
    }
}
