//! recap - Meeting transcript intelligence pipeline
//!
//! Post-processes machine-generated meeting transcripts into structured,
//! user-relevant intelligence: merged speaker-attributed transcripts,
//! extracted action items, tracked mentions of a named participant, and
//! personalized per-user insight bundles.
//!
//! # Architecture
//!
//! The pipeline runs once per transcript-processing request:
//! - Transcription and diarization results are aligned into
//!   speaker-attributed segments
//! - Action items are extracted from annotated sentences
//! - When a participant name is supplied, mentions are tracked and a
//!   personal insight bundle is synthesized
//!
//! Required stages (alignment, action items) fail the request on error;
//! optional stages (diarization, mentions, insights) degrade to absent
//! results.
//!
//! # Modules
//!
//! - `adapters`: External collaborator clients (whisper, diarization,
//!   annotation, summarization)
//! - `core`: Analysis logic (aligner, extractor, tracker, synthesizer)
//! - `domain`: Data structures (Segment, ActionItem, MentionReport, ...)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Analyze pre-produced transcription + diarization JSON
//! recap analyze -t transcript.json -d diarization.json --user "Jane Doe"
//!
//! # Process an audio file end-to-end
//! recap process meeting.wav --user "Jane Doe"
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use core::{MeetingAnalyzer, MentionTracker};
pub use domain::{
    ActionItem, DiarizationInterval, MeetingReport, MentionReport, PersonalInsights, Priority,
    Segment, TranscriptionOutput,
};

// Collaborator interfaces
pub use adapters::{Annotator, Summarizer, SummaryOptions};
