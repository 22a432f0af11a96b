//! Mention tracking for a named participant.
//!
//! Locates every occurrence of a participant's name (and generated
//! variants) in the transcript by byte offset, deduplicates overlapping
//! variant hits, and derives a highlighted transcript, mention-bearing
//! sentences, directive task assignments, speaker statistics, and an
//! engagement tier.
//!
//! Mention tracking is an optional pipeline stage: every internal error is
//! caught at this boundary and converted to "no result".

use chrono::Utc;
use regex::{escape, Regex, RegexBuilder};
use tracing::{debug, error, info, warn};

use crate::config::{EngagementThresholds, Tunables};
use crate::domain::{
    EngagementLevel, Mention, MentionReport, Segment, SentenceMention, SentenceMentions,
    SpeakerMention, TaskAssignment,
};

/// Highlight markers wrapped around each matched span
pub const MENTION_OPEN: &str = "[MENTION]";
pub const MENTION_CLOSE: &str = "[/MENTION]";

/// Generate lowercased matching variations for a name.
///
/// Always the full name; for multi-word names also the first token and
/// the initials. Deduplicated, insertion order preserved.
pub fn name_variations(username: &str) -> Vec<String> {
    let mut variations = vec![username.to_lowercase()];

    let tokens: Vec<&str> = username.split_whitespace().collect();
    if tokens.len() > 1 {
        variations.push(tokens[0].to_lowercase());

        let initials: String = tokens
            .iter()
            .filter_map(|t| t.chars().next())
            .collect::<String>()
            .to_lowercase();
        variations.push(initials);
    }

    variations.dedup();
    variations
}

/// Mention tracker configured from the analysis tunables
pub struct MentionTracker {
    gap: usize,
    context_window: usize,
    min_task_length: usize,
    engagement: EngagementThresholds,
}

impl Default for MentionTracker {
    fn default() -> Self {
        Self::new(&Tunables::default())
    }
}

impl MentionTracker {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            gap: tunables.mention_gap_bytes,
            context_window: tunables.context_window_bytes,
            min_task_length: tunables.min_task_length,
            engagement: tunables.engagement.clone(),
        }
    }

    /// Track all mentions of `username` in the transcript.
    ///
    /// Returns None when the username or transcript is empty, when no
    /// mentions are found, or when anything goes wrong internally —
    /// mention tracking never fails the enclosing request.
    pub fn track(
        &self,
        username: &str,
        transcript: &str,
        segments: &[Segment],
        diarization_available: bool,
    ) -> Option<MentionReport> {
        let username = username.trim();
        if username.is_empty() || transcript.is_empty() {
            warn!("Empty username or transcript provided");
            return None;
        }

        match self.track_inner(username, transcript, segments, diarization_available) {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "Error tracking mentions");
                None
            }
        }
    }

    fn track_inner(
        &self,
        username: &str,
        transcript: &str,
        segments: &[Segment],
        diarization_available: bool,
    ) -> anyhow::Result<Option<MentionReport>> {
        info!(username, "Starting mention tracking");

        let variations = name_variations(username);
        debug!(?variations, "Name variations");

        let mentions = self.find_mentions(transcript, &variations)?;
        info!(count = mentions.len(), username, "Found mentions");

        if mentions.is_empty() {
            return Ok(None);
        }

        let highlight_transcript = build_highlighted_transcript(transcript, &mentions);
        let sentences_with_mentions = extract_sentences_with_mentions(transcript, &mentions);
        let assigned_tasks =
            self.extract_task_assignments(&sentences_with_mentions, username, &variations)?;

        let speaker_mentions = if diarization_available {
            speaker_mentions(segments, &variations)
        } else {
            Vec::new()
        };

        let engagement_level = self.engagement_level(mentions.len());

        Ok(Some(MentionReport {
            username: username.to_string(),
            highlight_transcript,
            mention_count: mentions.len(),
            sentence_count: sentences_with_mentions.len(),
            sentences_with_mentions,
            mentions,
            assigned_tasks,
            speaker_mentions,
            engagement_level,
            tracked_at: Utc::now(),
        }))
    }

    /// Whole-word, case-insensitive search for every variation,
    /// deduplicated by position gap
    fn find_mentions(&self, transcript: &str, variations: &[String]) -> anyhow::Result<Vec<Mention>> {
        let mut mentions = Vec::new();

        for variation in variations {
            let pattern = format!(r"\b{}\b", escape(variation));
            let re = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

            for m in re.find_iter(transcript) {
                let context = context_window(transcript, m.start(), m.end(), self.context_window);

                mentions.push(Mention {
                    variation: variation.clone(),
                    matched_text: m.as_str().to_string(),
                    position: m.start(),
                    end_position: m.end(),
                    context: context.trim().to_string(),
                });
            }
        }

        Ok(self.deduplicate(mentions))
    }

    /// Collapse overlapping variation hits: after sorting by position, a
    /// mention is kept only if it starts at least `gap` bytes past the
    /// previous kept mention's end.
    fn deduplicate(&self, mut mentions: Vec<Mention>) -> Vec<Mention> {
        if mentions.is_empty() {
            return mentions;
        }

        mentions.sort_by_key(|m| m.position);

        let mut deduplicated: Vec<Mention> = Vec::with_capacity(mentions.len());
        for mention in mentions {
            if let Some(last) = deduplicated.last() {
                if mention.position < last.end_position + self.gap {
                    continue;
                }
            }
            deduplicated.push(mention);
        }

        deduplicated
    }

    /// Parse directive patterns out of mention-bearing sentences
    fn extract_task_assignments(
        &self,
        sentences: &[SentenceMentions],
        username: &str,
        variations: &[String],
    ) -> anyhow::Result<Vec<TaskAssignment>> {
        let patterns = directive_patterns(variations)?;

        let mut tasks: Vec<TaskAssignment> = Vec::new();
        let mut seen: Vec<String> = Vec::new();

        for sentence in sentences {
            for pattern in &patterns {
                for caps in pattern.captures_iter(&sentence.sentence) {
                    let Some(task_match) = caps.get(1) else {
                        continue;
                    };

                    let task_text = task_match.as_str().trim();
                    if task_text.len() <= self.min_task_length {
                        continue;
                    }

                    let task_text = capitalize_first(task_text);
                    let key = task_text.to_lowercase();
                    if seen.contains(&key) {
                        continue;
                    }
                    seen.push(key);

                    tasks.push(TaskAssignment {
                        task: task_text,
                        assigned_to: username.to_string(),
                        source_sentence: sentence.sentence.clone(),
                        confidence: "extracted".to_string(),
                    });
                }
            }
        }

        Ok(tasks)
    }

    /// Engagement tier from the total mention count
    fn engagement_level(&self, mention_count: usize) -> EngagementLevel {
        if mention_count >= self.engagement.high {
            EngagementLevel::High
        } else if mention_count >= self.engagement.medium {
            EngagementLevel::Medium
        } else if mention_count >= self.engagement.moderate {
            EngagementLevel::Moderate
        } else if mention_count > 0 {
            EngagementLevel::Low
        } else {
            EngagementLevel::None
        }
    }
}

/// Extract a context window around a span, clamped to char boundaries
fn context_window(text: &str, start: usize, end: usize, window: usize) -> &str {
    let mut ctx_start = start.saturating_sub(window);
    while ctx_start > 0 && !text.is_char_boundary(ctx_start) {
        ctx_start -= 1;
    }

    let mut ctx_end = (end + window).min(text.len());
    while ctx_end < text.len() && !text.is_char_boundary(ctx_end) {
        ctx_end += 1;
    }

    &text[ctx_start..ctx_end]
}

/// Wrap each mention span in highlight markers.
///
/// Mentions are processed in descending position order so earlier
/// replacements never shift the offsets of later-starting spans.
fn build_highlighted_transcript(transcript: &str, mentions: &[Mention]) -> String {
    let mut highlighted = transcript.to_string();

    let mut by_position_desc: Vec<&Mention> = mentions.iter().collect();
    by_position_desc.sort_by(|a, b| b.position.cmp(&a.position));

    for mention in by_position_desc {
        highlighted.replace_range(
            mention.position..mention.end_position,
            &format!("{}{}{}", MENTION_OPEN, mention.matched_text, MENTION_CLOSE),
        );
    }

    highlighted
}

/// Byte spans of the transcript's sentences.
///
/// A sentence boundary is a whitespace run that follows terminal
/// punctuation, or any whitespace run containing a newline. Spans are
/// computed from the actual text, so every mention's start offset falls
/// inside exactly one span.
fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut chunk_start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !c.is_whitespace() {
            i += 1;
            continue;
        }

        // Measure the whitespace run
        let mut j = i;
        let mut has_newline = false;
        while j < chars.len() && chars[j].1.is_whitespace() {
            if chars[j].1 == '\n' {
                has_newline = true;
            }
            j += 1;
        }

        let after_terminal = i > 0 && matches!(chars[i - 1].1, '.' | '!' | '?');
        if after_terminal || has_newline {
            if pos > chunk_start {
                spans.push((chunk_start, pos));
            }
            chunk_start = if j < chars.len() { chars[j].0 } else { text.len() };
        }

        i = j;
    }

    if chunk_start < text.len() {
        spans.push((chunk_start, text.len()));
    }

    spans
}

/// Attach mentions to the sentences containing them, rebasing offsets to
/// sentence-local coordinates
fn extract_sentences_with_mentions(transcript: &str, mentions: &[Mention]) -> Vec<SentenceMentions> {
    let mut sentences = Vec::new();

    for (start, end) in sentence_spans(transcript) {
        let raw = &transcript[start..end];
        if raw.trim().is_empty() {
            continue;
        }

        let in_sentence: Vec<SentenceMention> = mentions
            .iter()
            .filter(|m| m.position >= start && m.position < end)
            .map(|m| SentenceMention {
                text: m.matched_text.clone(),
                variation: m.variation.clone(),
                position_in_sentence: m.position - start,
            })
            .collect();

        if !in_sentence.is_empty() {
            sentences.push(SentenceMentions {
                sentence: raw.trim().to_string(),
                position: start,
                mention_count: in_sentence.len(),
                mentions: in_sentence,
            });
        }
    }

    sentences
}

/// Compile the directive task patterns with the variation set interpolated
fn directive_patterns(variations: &[String]) -> anyhow::Result<Vec<Regex>> {
    let names = variations
        .iter()
        .map(|v| escape(v))
        .collect::<Vec<_>>()
        .join("|");

    let raw = [
        // "can you <X>" / "can NAME <X>" / "NAME will <X>"
        format!(
            r"(?:can you|could you|will you|would you|can (?:{names})|(?:{names})\s+(?:can|could|will|would))\s+(.+?)(?:[.!?]|$)"
        ),
        // "assigned to NAME the task <X>"
        format!(
            r"(?:assign|assigned|assign to|give to)\s+(?:{names})\s+(?:the\s+)?task\s+(?:to\s+)?(.+?)(?:[.!?]|$)"
        ),
        // "NAME needs to <X>"
        format!(r"(?:{names})\s+(?:needs to|should|will|can|must)\s+(.+?)(?:[.!?]|$)"),
        // "needs NAME to <X>"
        format!(r"(?:needs|need)\s+(?:{names})\s+to\s+(.+?)(?:[.!?]|$)"),
    ];

    raw.iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(Into::into)
        })
        .collect()
}

/// Segments whose speaker label contains a name variation
fn speaker_mentions(segments: &[Segment], variations: &[String]) -> Vec<SpeakerMention> {
    let mut found = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        let speaker_lower = segment.speaker.to_lowercase();
        if variations.iter().any(|v| speaker_lower.contains(v.as_str())) {
            found.push(SpeakerMention {
                segment_index: index,
                speaker: segment.speaker.clone(),
                text: segment.text.clone(),
                start_time: segment.start,
                end_time: segment.end,
            });
        }
    }

    found
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
