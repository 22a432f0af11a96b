//! Personal insight bundle for a named participant.

use serde::{Deserialize, Serialize};

use super::action::ActionItem;
use super::segment::Segment;

/// Which strategy first matched a personal segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// The segment's speaker label contains the user's name
    SpeakerMatch,

    /// The segment text contains a whole-word name variation hit
    NameMention,
}

/// A segment matched to the participant, with the match strategy recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalSegment {
    #[serde(flatten)]
    pub segment: Segment,

    /// Strategy that matched this segment (speaker match takes priority)
    pub match_reason: MatchReason,
}

/// Participant-specific subset of the meeting: transcript, summary, tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInsights {
    /// Participant name as supplied
    pub name: String,

    /// Condensed summary of the participant's involvement (may be empty)
    pub personal_summary: String,

    /// Space-joined text of all matched segments
    pub personal_transcript: String,

    /// The matched segments with match reasons
    pub personal_segments: Vec<PersonalSegment>,

    /// Global action items filtered down to this participant
    pub assigned_tasks: Vec<ActionItem>,

    /// Number of matched segments
    pub transcript_coverage: usize,

    /// Number of filtered action items
    pub action_items_count: usize,
}
