//! Personal insight synthesis for a named participant.
//!
//! Composes a participant-specific transcript subset via speaker-identity
//! and name-mention matching, requests a condensed secondary summary over
//! it, and filters the global action-item list down to items relevant to
//! the participant.
//!
//! Like mention tracking, this is an optional stage: internal errors are
//! caught at the boundary and converted to "no result".

use std::sync::Arc;

use regex::{escape, RegexBuilder};
use tracing::{debug, error, info, warn};

use crate::adapters::{Summarizer, SummaryOptions};
use crate::config::Tunables;
use crate::domain::{ActionItem, MatchReason, PersonalInsights, PersonalSegment, Segment};

use super::mentions::name_variations;

/// Personal insight synthesizer
pub struct InsightSynthesizer {
    summarizer: Option<Arc<dyn Summarizer>>,
    summary_max_tokens: usize,
    summary_min_tokens: usize,
    min_transcript_chars: usize,
}

impl InsightSynthesizer {
    pub fn new(summarizer: Option<Arc<dyn Summarizer>>, tunables: &Tunables) -> Self {
        Self {
            summarizer,
            summary_max_tokens: tunables.personal_summary_max_tokens,
            summary_min_tokens: tunables.personal_summary_min_tokens,
            min_transcript_chars: tunables.min_personal_transcript_chars,
        }
    }

    /// Synthesize the personal bundle for `user_name`.
    ///
    /// Returns None when the name is empty, when no segment matches, or on
    /// any internal error — personal insights never fail the request.
    pub async fn synthesize(
        &self,
        user_name: &str,
        segments: &[Segment],
        action_items: &[ActionItem],
        diarization_available: bool,
    ) -> Option<PersonalInsights> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            warn!("User name is empty, skipping personal insights");
            return None;
        }

        match self
            .synthesize_inner(user_name, segments, action_items, diarization_available)
            .await
        {
            Ok(insights) => insights,
            Err(e) => {
                error!(user_name, error = %e, "Error extracting personal insights");
                None
            }
        }
    }

    async fn synthesize_inner(
        &self,
        user_name: &str,
        segments: &[Segment],
        action_items: &[ActionItem],
        diarization_available: bool,
    ) -> anyhow::Result<Option<PersonalInsights>> {
        info!(user_name, "Extracting personal insights");

        let personal_segments =
            extract_personal_segments(user_name, segments, diarization_available)?;

        let personal_transcript = personal_segments
            .iter()
            .map(|p| p.segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        if personal_transcript.is_empty() {
            warn!(user_name, "No personal transcript found");
            return Ok(None);
        }

        let personal_summary = self
            .personal_summary(&personal_transcript, user_name)
            .await;

        let assigned_tasks =
            filter_personal_action_items(user_name, action_items, &personal_transcript);

        info!(
            user_name,
            segments = personal_segments.len(),
            tasks = assigned_tasks.len(),
            "Personal insights extracted"
        );

        Ok(Some(PersonalInsights {
            name: user_name.to_string(),
            personal_summary,
            transcript_coverage: personal_segments.len(),
            action_items_count: assigned_tasks.len(),
            personal_transcript,
            personal_segments,
            assigned_tasks,
        }))
    }

    /// Condensed summary of the personal transcript, prefixed with an
    /// explanatory header. Degrades to an empty string when the transcript
    /// is too short, no summarizer is configured, or the collaborator
    /// fails.
    async fn personal_summary(&self, personal_transcript: &str, user_name: &str) -> String {
        if personal_transcript.len() < self.min_transcript_chars {
            warn!(
                user_name,
                chars = personal_transcript.len(),
                "Personal transcript too short to summarize"
            );
            return String::new();
        }

        let Some(summarizer) = &self.summarizer else {
            debug!("No summarizer configured, skipping personal summary");
            return String::new();
        };

        let options = SummaryOptions {
            max_length: self.summary_max_tokens,
            min_length: self.summary_min_tokens,
        };

        match summarizer.summarize(personal_transcript, options).await {
            Ok(result) if !result.summary.is_empty() => format!(
                "Summary for {}'s involvement in the meeting:\n{}",
                user_name, result.summary
            ),
            Ok(_) => String::new(),
            Err(e) => {
                error!(user_name, error = %e, "Error generating personal summary");
                String::new()
            }
        }
    }
}

/// Select segments relevant to the user via two non-exclusive strategies:
/// speaker-label containment (diarization required) and whole-word name
/// mentions in the text. Speaker match takes priority as the recorded
/// reason; duplicates are collapsed by exact segment text.
fn extract_personal_segments(
    user_name: &str,
    segments: &[Segment],
    diarization_available: bool,
) -> anyhow::Result<Vec<PersonalSegment>> {
    let name_lower = user_name.to_lowercase();
    let variations = name_variations(user_name);
    debug!(?variations, "Looking for name variations");

    let mention_patterns: Vec<regex::Regex> = variations
        .iter()
        .map(|v| {
            RegexBuilder::new(&format!(r"\b{}\b", escape(v)))
                .case_insensitive(true)
                .build()
                .map_err(Into::into)
        })
        .collect::<anyhow::Result<_>>()?;

    let mut personal = Vec::new();
    let mut seen_texts: Vec<String> = Vec::new();

    for segment in segments {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }

        let mut reason = None;

        if diarization_available && segment.speaker.to_lowercase().contains(&name_lower) {
            reason = Some(MatchReason::SpeakerMatch);
        }

        if reason.is_none() && mention_patterns.iter().any(|re| re.is_match(text)) {
            reason = Some(MatchReason::NameMention);
        }

        if let Some(match_reason) = reason {
            if !seen_texts.contains(&segment.text) {
                seen_texts.push(segment.text.clone());
                personal.push(PersonalSegment {
                    segment: segment.clone(),
                    match_reason,
                });
            }
        }
    }

    Ok(personal)
}

/// Keep action items whose assignee contains a name variation, or whose
/// task/context text appears verbatim in the personal transcript
fn filter_personal_action_items(
    user_name: &str,
    action_items: &[ActionItem],
    personal_transcript: &str,
) -> Vec<ActionItem> {
    let variations = name_variations(user_name);
    let transcript_lower = personal_transcript.to_lowercase();

    action_items
        .iter()
        .filter(|item| {
            let assignee_lower = item.assignee.to_lowercase();
            if variations.iter().any(|v| assignee_lower.contains(v.as_str())) {
                return true;
            }

            let task_lower = item.task.to_lowercase();
            if !task_lower.is_empty() && transcript_lower.contains(&task_lower) {
                return true;
            }

            let context_lower = item.context.to_lowercase();
            !context_lower.is_empty() && transcript_lower.contains(&context_lower)
        })
        .cloned()
        .collect()
}
