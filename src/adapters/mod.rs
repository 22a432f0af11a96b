//! Collaborator interfaces for external AI services.
//!
//! The core pipeline consumes four black-box collaborators: transcription,
//! diarization, sentence/NER annotation, and summarization. This module
//! defines the trait boundaries and shared payload types; the submodules
//! provide the concrete clients (subprocess whisper, HTTP sidecars).

pub mod annotate;
pub mod diarize;
pub mod summarize;
pub mod whisper;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Summary;

pub use annotate::HttpAnnotator;
pub use diarize::DiarizationClient;
pub use summarize::HttpSummarizer;
pub use whisper::WhisperTranscriber;

/// Entity label for person names, the only label the core relies on
pub const PERSON_LABEL: &str = "PERSON";

/// Transport-level errors from collaborator clients
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Collaborator endpoint not configured: {0}")]
    NotConfigured(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response payload: {0}")]
    Payload(String),
}

/// A labeled entity span within a sentence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Entity surface text
    pub text: String,

    /// Entity label (e.g., "PERSON")
    pub label: String,
}

/// A sentence with its entity annotations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    /// Raw sentence text
    pub text: String,

    /// Labeled entity spans found in the sentence
    #[serde(default)]
    pub entities: Vec<EntitySpan>,
}

impl AnnotatedSentence {
    /// Person entity texts in the sentence, in annotation order
    pub fn persons(&self) -> Vec<&str> {
        self.entities
            .iter()
            .filter(|e| e.label == PERSON_LABEL)
            .map(|e| e.text.as_str())
            .collect()
    }
}

/// Sentence segmentation + named-entity recognition collaborator
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Human-readable collaborator name
    fn name(&self) -> &str;

    /// Split text into sentences with entity annotations
    async fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>>;
}

/// Length configuration for a summarization request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Target maximum summary length in tokens
    pub max_length: usize,

    /// Minimum summary length in tokens
    pub min_length: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_length: 200,
            min_length: 30,
        }
    }
}

/// Abstractive summarization collaborator
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Human-readable collaborator name
    fn name(&self) -> &str;

    /// Summarize text, chunking internally when the input is long
    async fn summarize(&self, text: &str, options: SummaryOptions) -> Result<Summary>;
}
