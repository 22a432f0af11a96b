//! Heuristic action item extraction.
//!
//! Scans sentence-level text for actionable statements and emits
//! structured, confidence-scored task records. Sentence boundaries and
//! person entities come from the annotation collaborator; everything else
//! is keyword and pattern matching against the fixed tables in
//! [`patterns`](super::patterns).

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::{AnnotatedSentence, Annotator};
use crate::domain::{ActionItem, Priority};

use super::patterns;

/// Minimum confidence for an item to be emitted
const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Word-count range that contributes to the confidence score
const IDEAL_SENTENCE_WORDS: std::ops::RangeInclusive<usize> = 5..=30;

/// Action item extractor over annotated sentences
pub struct ActionItemExtractor {
    annotator: Arc<dyn Annotator>,
}

impl ActionItemExtractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self { annotator }
    }

    /// Extract action items from transcript text.
    ///
    /// This is a required pipeline output: annotation failures and any
    /// internal error propagate to the caller.
    pub async fn extract(&self, text: &str) -> Result<Vec<ActionItem>> {
        info!("Extracting action items");

        let sentences = self
            .annotator
            .annotate(text)
            .await
            .with_context(|| format!("Sentence annotation failed ({})", self.annotator.name()))?;

        let mut items = Vec::new();

        for sentence in &sentences {
            let sentence_text = sentence.text.trim();
            if !contains_action_verb(sentence_text) {
                continue;
            }

            let assignee = extract_assignee(sentence);
            let deadline = extract_deadline(sentence_text);
            let priority = extract_priority(sentence_text);
            let task = extract_task_description(sentence_text);

            let confidence = confidence_score(
                assignee.is_some(),
                deadline.is_some(),
                sentence_text.split_whitespace().count(),
            );

            if confidence >= CONFIDENCE_THRESHOLD && !task.is_empty() {
                items.push(ActionItem {
                    task,
                    assignee: assignee.unwrap_or_else(|| "Unassigned".to_string()),
                    deadline: deadline.unwrap_or_else(|| "No deadline specified".to_string()),
                    priority,
                    context: sentence_text.to_string(),
                    confidence,
                });
            } else {
                debug!(confidence, sentence = sentence_text, "Sentence below threshold");
            }
        }

        info!(count = items.len(), "Found action items");

        // Stable: ties keep extraction (document) order
        items.sort_by_key(|item| item.priority.rank());

        Ok(items)
    }
}

/// True when the sentence contains any action-indicating phrase
fn contains_action_verb(text: &str) -> bool {
    let text_lower = text.to_lowercase();
    patterns::ACTION_VERBS
        .iter()
        .any(|verb| text_lower.contains(verb))
}

/// Resolve the assignee: person entities first, role vocabulary second
fn extract_assignee(sentence: &AnnotatedSentence) -> Option<String> {
    let persons = sentence.persons();
    if !persons.is_empty() {
        return Some(persons.join(" and "));
    }

    let text_lower = sentence.text.to_lowercase();
    patterns::ASSIGNEE_ROLES
        .iter()
        .find(|role| text_lower.contains(&format!("the {}", role)))
        .map(|role| format!("The {}", role))
}

/// First deadline pattern match, title-cased
fn extract_deadline(text: &str) -> Option<String> {
    patterns::deadline_patterns()
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| title_case(m.as_str()))
}

/// High keywords beat low keywords; everything else is medium
fn extract_priority(text: &str) -> Priority {
    let text_lower = text.to_lowercase();

    if patterns::HIGH_PRIORITY_KEYWORDS
        .iter()
        .any(|kw| text_lower.contains(kw))
    {
        return Priority::High;
    }
    if patterns::LOW_PRIORITY_KEYWORDS
        .iter()
        .any(|kw| text_lower.contains(kw))
    {
        return Priority::Low;
    }

    Priority::Medium
}

/// Strip discourse filler, polite-request, and vocative prefixes,
/// then capitalize the first letter
fn extract_task_description(text: &str) -> String {
    let text = patterns::filler_prefix_regex().replace(text, "");
    let text = patterns::polite_prefix_regex().replace(&text, "");
    let text = patterns::vocative_prefix_regex().replace(&text, "");

    capitalize_first(text.trim())
}

/// Weighted confidence: action verb 0.3 (guaranteed by the caller's
/// filter), assignee 0.3, deadline 0.2, ideal sentence length 0.2.
/// Capped at 1.0, rounded to 2 decimals.
fn confidence_score(has_assignee: bool, has_deadline: bool, word_count: usize) -> f64 {
    let mut score: f64 = 0.3;
    if has_assignee {
        score += 0.3;
    }
    if has_deadline {
        score += 0.2;
    }
    if IDEAL_SENTENCE_WORDS.contains(&word_count) {
        score += 0.2;
    }

    (score.min(1.0) * 100.0).round() / 100.0
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Capitalize the first letter of each whitespace-separated word,
/// lowercasing the rest ("next week" -> "Next Week")
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
