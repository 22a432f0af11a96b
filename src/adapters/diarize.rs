//! Diarization sidecar client.
//!
//! Speaker diarization is strictly optional: every failure mode —
//! unconfigured endpoint, unreachable sidecar, malformed payload —
//! degrades to an empty interval list so the pipeline falls back to
//! generic speaker labels. This client never returns an error.
//!
//! The readiness probe runs once per process on first use; the result is
//! cached so a missing sidecar costs a single connection attempt.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::domain::DiarizationInterval;

/// HTTP client for the diarization sidecar
pub struct DiarizationClient {
    endpoint: Option<String>,
    client: reqwest::Client,
    ready: OnceCell<bool>,
}

#[derive(Serialize)]
struct DiarizeRequest<'a> {
    audio_path: &'a str,
}

impl DiarizationClient {
    /// Create a client. `endpoint` is the sidecar base URL; None disables
    /// diarization entirely.
    pub fn new(endpoint: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(600))
            .build()
            .unwrap_or_default();

        Self {
            endpoint,
            client,
            ready: OnceCell::new(),
        }
    }

    /// One-time readiness probe, cached for the process lifetime
    async fn is_ready(&self) -> bool {
        *self
            .ready
            .get_or_init(|| async {
                let Some(endpoint) = &self.endpoint else {
                    warn!(
                        "Diarization endpoint not configured. Set RECAP_DIARIZATION_URL \
                         to enable speaker diarization."
                    );
                    return false;
                };

                match self
                    .client
                    .get(format!("{}/health", endpoint.trim_end_matches('/')))
                    .send()
                    .await
                {
                    Ok(response) if response.status().is_success() => {
                        info!(endpoint, "Diarization sidecar ready");
                        true
                    }
                    Ok(response) => {
                        warn!(status = %response.status(), "Diarization sidecar unhealthy");
                        false
                    }
                    Err(e) => {
                        warn!(error = %e, "Diarization sidecar unreachable");
                        false
                    }
                }
            })
            .await
    }

    /// Diarize an audio file.
    ///
    /// Returns speaker-homogeneous intervals, or an empty vec on any
    /// failure. Never raises to the caller.
    pub async fn diarize(&self, audio_path: &Path) -> Vec<DiarizationInterval> {
        if !audio_path.exists() {
            warn!(audio = %audio_path.display(), "Audio file not found, skipping diarization");
            return Vec::new();
        }

        if !self.is_ready().await {
            warn!("Diarization skipped. Continuing without speaker labels.");
            return Vec::new();
        }

        // is_ready() returned true, so the endpoint is set
        let Some(endpoint) = &self.endpoint else {
            return Vec::new();
        };

        info!(audio = %audio_path.display(), "Starting speaker diarization");

        let request = DiarizeRequest {
            audio_path: &audio_path.to_string_lossy(),
        };

        let response = match self
            .client
            .post(format!("{}/diarize", endpoint.trim_end_matches('/')))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Diarization request failed. Continuing without diarization.");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "Diarization returned an error status");
            return Vec::new();
        }

        match response.json::<Vec<DiarizationInterval>>().await {
            Ok(intervals) => {
                info!(count = intervals.len(), "Diarization completed");
                intervals
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse diarization payload");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_endpoint_is_not_ready() {
        let client = DiarizationClient::new(None);
        assert!(!client.is_ready().await);
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty() {
        let client = DiarizationClient::new(Some("http://localhost:1".to_string()));
        let intervals = client.diarize(Path::new("/nonexistent/audio.wav")).await;
        assert!(intervals.is_empty());
    }
}
