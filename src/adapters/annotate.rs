//! Sentence segmentation + NER sidecar client.
//!
//! The annotator is a required collaborator for action item extraction:
//! transport failures here propagate as errors rather than degrading.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AnnotatedSentence, Annotator, CollaboratorError};

/// HTTP client for the annotation sidecar
pub struct HttpAnnotator {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    sentences: Vec<AnnotatedSentence>,
}

impl HttpAnnotator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    fn name(&self) -> &str {
        "http-annotator"
    }

    async fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>> {
        let response = self
            .client
            .post(format!("{}/annotate", self.endpoint.trim_end_matches('/')))
            .json(&AnnotateRequest { text })
            .send()
            .await
            .map_err(CollaboratorError::Http)?;

        if !response.status().is_success() {
            return Err(CollaboratorError::Payload(format!(
                "annotator returned status {}",
                response.status()
            ))
            .into());
        }

        let parsed: AnnotateResponse = response.json().await.map_err(CollaboratorError::Http)?;

        debug!(sentences = parsed.sentences.len(), "Annotation complete");
        Ok(parsed.sentences)
    }
}
