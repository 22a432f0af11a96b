//! Mention tracking data types.
//!
//! A mention is an occurrence of a target name (or a generated variant)
//! in transcript text, located by byte offset into the full transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single located occurrence of a name variation
///
/// Offsets are byte indices into the full transcript. After deduplication
/// no two retained mentions start within the configured gap of the
/// previous mention's end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    /// The name variation that matched (lowercased)
    pub variation: String,

    /// The text as it appeared in the transcript
    pub matched_text: String,

    /// Start byte offset into the transcript
    pub position: usize,

    /// End byte offset (exclusive)
    pub end_position: usize,

    /// Surrounding context window (~50 bytes each side, trimmed)
    pub context: String,
}

/// A mention rebased to sentence-local coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceMention {
    /// The matched text
    pub text: String,

    /// The variation that matched
    pub variation: String,

    /// Byte offset of the mention within its sentence
    pub position_in_sentence: usize,
}

/// A sentence containing one or more mentions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceMentions {
    /// The sentence text (trimmed)
    pub sentence: String,

    /// Absolute byte offset of the sentence start in the transcript
    pub position: usize,

    /// Number of mentions within the sentence
    pub mention_count: usize,

    /// The mentions, rebased to sentence-local offsets
    pub mentions: Vec<SentenceMention>,
}

/// A task assignment parsed from a mention-bearing sentence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAssignment {
    /// Captured task text, first letter capitalized
    pub task: String,

    /// The tracked participant the task was directed at
    pub assigned_to: String,

    /// The sentence the assignment was parsed from
    pub source_sentence: String,

    /// Provenance marker (always "extracted" for pattern matches)
    pub confidence: String,
}

/// A segment spoken by the tracked participant (diarization required)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerMention {
    /// Index of the segment in the aligned segment list
    pub segment_index: usize,

    /// The speaker label that matched a name variation
    pub speaker: String,

    /// Segment text
    pub text: String,

    /// Segment start time in seconds
    pub start_time: f64,

    /// Segment end time in seconds
    pub end_time: f64,
}

/// Engagement tier derived from total mention count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    High,
    Medium,
    Moderate,
    Low,
    None,
}

impl EngagementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementLevel::High => "high",
            EngagementLevel::Medium => "medium",
            EngagementLevel::Moderate => "moderate",
            EngagementLevel::Low => "low",
            EngagementLevel::None => "none",
        }
    }
}

/// Full mention-tracking result for one participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionReport {
    /// The tracked participant name as supplied (trimmed)
    pub username: String,

    /// Transcript with each mention wrapped in [MENTION]..[/MENTION] tags
    pub highlight_transcript: String,

    /// Total retained mentions after deduplication
    pub mention_count: usize,

    /// The deduplicated mentions, ascending by position
    pub mentions: Vec<Mention>,

    /// Sentences containing mentions
    pub sentences_with_mentions: Vec<SentenceMentions>,

    /// Number of mention-bearing sentences
    pub sentence_count: usize,

    /// Task assignments parsed from mention-bearing sentences
    pub assigned_tasks: Vec<TaskAssignment>,

    /// Segments attributed to the participant (empty without diarization)
    pub speaker_mentions: Vec<SpeakerMention>,

    /// Engagement tier derived from the mention count
    pub engagement_level: EngagementLevel,

    /// When tracking ran
    pub tracked_at: DateTime<Utc>,
}
