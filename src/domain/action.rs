//! Action items extracted from meeting transcripts.

use serde::{Deserialize, Serialize};

/// Priority of an action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high before medium before low
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// A structured, confidence-scored actionable statement
///
/// Created once per qualifying sentence and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// Cleaned task description
    pub task: String,

    /// Resolved assignee, or "Unassigned"
    pub assignee: String,

    /// Resolved deadline, or "No deadline specified"
    pub deadline: String,

    /// Priority derived from keyword matching
    pub priority: Priority,

    /// The source sentence the item was extracted from
    pub context: String,

    /// Heuristic confidence in [0, 1], rounded to 2 decimals
    pub confidence: f64,
}
