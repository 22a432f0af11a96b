//! Transcript segments and diarization intervals.
//!
//! A Segment is a time-bounded span of transcript text with an attributed
//! speaker. Segments are produced by the interval aligner and immutable
//! thereafter.

use serde::{Deserialize, Serialize};

/// Speaker label assigned when diarization is unavailable or no
/// diarization interval overlaps a segment.
pub const DEFAULT_SPEAKER: &str = "Speaker_0";

/// A raw transcription segment (no speaker attribution yet)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribedSegment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Transcribed text for this span
    pub text: String,
}

/// Output of the transcription collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionOutput {
    /// Full transcript text
    pub text: String,

    /// Time-stamped segments
    pub segments: Vec<TranscribedSegment>,

    /// Detected language code (e.g., "en")
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// A speaker-homogeneous time interval from the diarization collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizationInterval {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Diarization speaker label (e.g., "SPEAKER_01")
    pub speaker: String,
}

/// A speaker-attributed transcript segment
///
/// Invariant: `start <= end`. The speaker is always present after
/// alignment — either a diarization label or [`DEFAULT_SPEAKER`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Segment text
    pub text: String,

    /// Attributed speaker label
    pub speaker: String,
}

/// The merged, speaker-attributed transcript handed to downstream stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedTranscript {
    /// Full transcript text
    pub full_text: String,

    /// Aligned segments
    pub segments: Vec<Segment>,

    /// Language code carried over from transcription
    pub language: String,
}
