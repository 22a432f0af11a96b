//! The per-request analysis report returned to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::ActionItem;
use super::insight::PersonalInsights;
use super::mention::MentionReport;
use super::segment::MergedTranscript;

/// Result of a summarization collaborator call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// The generated summary text
    pub summary: String,

    /// Character length of the input
    pub original_length: usize,

    /// Character length of the summary
    pub summary_length: usize,

    /// original_length / summary_length, rounded to 2 decimals
    pub compression_ratio: f64,
}

/// Complete analysis output for one meeting
///
/// Optional fields are present only when their preconditions were met:
/// a username was supplied, diarization succeeded, the personal
/// transcript was non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingReport {
    /// Request-scoped meeting identifier
    pub meeting_id: Uuid,

    /// Merged speaker-attributed transcript
    pub transcription: MergedTranscript,

    /// Whole-meeting summary, when a summarizer is configured and succeeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,

    /// Extracted action items, priority-ordered
    pub action_items: Vec<ActionItem>,

    /// Mention tracking result (username supplied and mentions found)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention_tracking: Option<MentionReport>,

    /// Personal insight bundle (username supplied and segments matched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_insights: Option<PersonalInsights>,

    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,
}
