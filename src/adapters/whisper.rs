//! Whisper transcription backend.
//!
//! Shells out to a local whisper binary and parses its JSON output into
//! time-stamped segments. Transcription is a required pipeline input, so
//! failures here propagate.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::process::Command;
use tracing::info;

use crate::domain::{TranscribedSegment, TranscriptionOutput};

/// Whisper output JSON structure
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    text: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    #[serde(default)]
    start: f64,
    #[serde(default)]
    end: f64,
    #[serde(default)]
    text: String,
}

/// Subprocess-based whisper transcription client
pub struct WhisperTranscriber {
    binary_path: String,
    model: String,
}

impl WhisperTranscriber {
    /// Create a transcriber for the given model, honoring `WHISPER_PATH`
    pub fn new(model: impl Into<String>) -> Self {
        let binary_path =
            std::env::var("WHISPER_PATH").unwrap_or_else(|_| "whisper".to_string());

        Self {
            binary_path,
            model: model.into(),
        }
    }

    /// Override the whisper binary location
    pub fn with_binary_path(mut self, binary_path: impl Into<String>) -> Self {
        self.binary_path = binary_path.into();
        self
    }

    /// Transcribe an audio file into text and time-stamped segments
    pub async fn transcribe(&self, audio_path: &Path) -> Result<TranscriptionOutput> {
        info!(audio = %audio_path.display(), model = %self.model, "Starting transcription");

        // Temp dir for whisper's JSON output
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;

        let output = Command::new(&self.binary_path)
            .arg(audio_path)
            .arg("--model")
            .arg(&self.model)
            .arg("--output_dir")
            .arg(temp_dir.path())
            .arg("--output_format")
            .arg("json")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to run whisper")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Whisper failed: {}", stderr.trim());
        }

        let stem = audio_path.file_stem().unwrap_or_default().to_string_lossy();
        let json_path = temp_dir.path().join(format!("{}.json", stem));

        let json_content = tokio::fs::read_to_string(&json_path)
            .await
            .context("Failed to read whisper output")?;

        let whisper: WhisperOutput =
            serde_json::from_str(&json_content).context("Failed to parse whisper JSON")?;

        let segments = whisper
            .segments
            .into_iter()
            .map(|seg| TranscribedSegment {
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
            })
            .collect();

        let language = if whisper.language.is_empty() {
            "en".to_string()
        } else {
            whisper.language
        };

        info!(%language, "Transcription complete");

        Ok(TranscriptionOutput {
            text: whisper.text.trim().to_string(),
            segments,
            language,
        })
    }
}
