//! Core transcript analytics.
//!
//! This module contains:
//! - Align: interval alignment of transcription and diarization
//! - Actions: heuristic action item extraction
//! - Mentions: participant mention tracking
//! - Insights: personal insight synthesis
//! - Analyzer: the per-request pipeline tying the stages together
//! - Patterns: fixed vocabularies and compiled-once regex tables

pub mod actions;
pub mod align;
pub mod analyzer;
pub mod insights;
pub mod mentions;
pub mod patterns;

// Re-export commonly used types
pub use actions::ActionItemExtractor;
pub use align::align;
pub use analyzer::MeetingAnalyzer;
pub use insights::InsightSynthesizer;
pub use mentions::{name_variations, MentionTracker, MENTION_CLOSE, MENTION_OPEN};
