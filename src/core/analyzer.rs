//! Per-request analysis pipeline.
//!
//! Coordinates the four analysis stages over one transcript-processing
//! request: alignment → summarization/extraction → mention tracking →
//! personal insight synthesis. Required stages propagate errors; optional
//! stages degrade to absent results and never fail the request.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::adapters::{Annotator, Summarizer, SummaryOptions};
use crate::config::Tunables;
use crate::domain::{
    DiarizationInterval, MeetingReport, MergedTranscript, Summary, TranscriptionOutput,
};

use super::actions::ActionItemExtractor;
use super::align::align;
use super::insights::InsightSynthesizer;
use super::mentions::MentionTracker;

/// Transcript analytics pipeline.
///
/// Constructed once at the composition root; all state is read-only
/// configuration and collaborator handles, safe to share across requests.
pub struct MeetingAnalyzer {
    summarizer: Option<Arc<dyn Summarizer>>,
    extractor: ActionItemExtractor,
    tracker: MentionTracker,
    synthesizer: InsightSynthesizer,
}

impl MeetingAnalyzer {
    pub fn new(
        annotator: Arc<dyn Annotator>,
        summarizer: Option<Arc<dyn Summarizer>>,
        tunables: &Tunables,
    ) -> Self {
        Self {
            extractor: ActionItemExtractor::new(annotator),
            tracker: MentionTracker::new(tunables),
            synthesizer: InsightSynthesizer::new(summarizer.clone(), tunables),
            summarizer,
        }
    }

    /// Run the full analysis over one meeting.
    ///
    /// Mention tracking and personal insights run only when `user_name`
    /// is supplied, and each is independently nullable in the report.
    #[instrument(skip(self, transcription, diarization), fields(user = user_name.unwrap_or("-")))]
    pub async fn analyze(
        &self,
        transcription: TranscriptionOutput,
        diarization: Vec<DiarizationInterval>,
        user_name: Option<&str>,
    ) -> Result<MeetingReport> {
        let meeting_id = Uuid::new_v4();
        let diarization_available = !diarization.is_empty();

        if diarization_available {
            info!(intervals = diarization.len(), "Diarization available");
        } else {
            warn!("Diarization empty, falling back to generic speaker labels");
        }

        let segments = align(&transcription.segments, &diarization);
        let transcription = MergedTranscript {
            full_text: transcription.text,
            segments,
            language: transcription.language,
        };

        let summary = self.global_summary(&transcription.full_text).await;

        let action_items = self
            .extractor
            .extract(&transcription.full_text)
            .await
            .context("Action item extraction failed")?;

        let mention_tracking = user_name.and_then(|user| {
            self.tracker.track(
                user,
                &transcription.full_text,
                &transcription.segments,
                diarization_available,
            )
        });

        let personal_insights = match user_name {
            Some(user) => {
                self.synthesizer
                    .synthesize(
                        user,
                        &transcription.segments,
                        &action_items,
                        diarization_available,
                    )
                    .await
            }
            None => None,
        };

        info!(
            %meeting_id,
            action_items = action_items.len(),
            mentions = mention_tracking.as_ref().map(|m| m.mention_count),
            "Analysis complete"
        );

        Ok(MeetingReport {
            meeting_id,
            transcription,
            summary,
            action_items,
            mention_tracking,
            personal_insights,
            analyzed_at: Utc::now(),
        })
    }

    /// Whole-meeting summary; absent when no summarizer is configured or
    /// the collaborator fails
    async fn global_summary(&self, full_text: &str) -> Option<Summary> {
        let summarizer = self.summarizer.as_ref()?;

        match summarizer
            .summarize(full_text, SummaryOptions::default())
            .await
        {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!(error = %e, "Summarization failed, continuing without summary");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::AnnotatedSentence;
    use crate::domain::TranscribedSegment;
    use async_trait::async_trait;

    /// One sentence, no entities
    struct PlainAnnotator;

    #[async_trait]
    impl Annotator for PlainAnnotator {
        fn name(&self) -> &str {
            "plain"
        }

        async fn annotate(&self, text: &str) -> Result<Vec<AnnotatedSentence>> {
            Ok(vec![AnnotatedSentence {
                text: text.to_string(),
                entities: vec![],
            }])
        }
    }

    fn transcription(text: &str) -> TranscriptionOutput {
        TranscriptionOutput {
            text: text.to_string(),
            segments: vec![TranscribedSegment {
                start: 0.0,
                end: 5.0,
                text: text.to_string(),
            }],
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn test_optional_fields_absent_without_username() {
        let analyzer = MeetingAnalyzer::new(Arc::new(PlainAnnotator), None, &Tunables::default());

        let report = analyzer
            .analyze(transcription("Short chat about nothing."), vec![], None)
            .await
            .unwrap();

        assert!(report.mention_tracking.is_none());
        assert!(report.personal_insights.is_none());
        assert!(report.summary.is_none());
    }

    #[tokio::test]
    async fn test_report_carries_aligned_segments() {
        let analyzer = MeetingAnalyzer::new(Arc::new(PlainAnnotator), None, &Tunables::default());

        let report = analyzer
            .analyze(transcription("Hello from the meeting."), vec![], None)
            .await
            .unwrap();

        assert_eq!(report.transcription.segments.len(), 1);
        assert_eq!(report.transcription.segments[0].speaker, "Speaker_0");
        assert_eq!(report.transcription.language, "en");
    }
}
