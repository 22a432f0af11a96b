//! Mention Tracking Integration Tests
//!
//! Scenario coverage plus the deduplication-gap and highlight round-trip
//! properties.

use recap::core::{MentionTracker, MENTION_CLOSE, MENTION_OPEN};
use recap::domain::{EngagementLevel, Segment, DEFAULT_SPEAKER};

fn tracker() -> MentionTracker {
    MentionTracker::default()
}

fn segment(speaker: &str, text: &str) -> Segment {
    Segment {
        start: 0.0,
        end: 5.0,
        text: text.to_string(),
        speaker: speaker.to_string(),
    }
}

#[test]
fn test_scenario_short_name_task_assignment() {
    // Scenario: username "Al", transcript "Al, can you review the deck?"
    let report = tracker()
        .track("Al", "Al, can you review the deck?", &[], false)
        .unwrap();

    assert_eq!(report.mention_count, 1);
    assert_eq!(report.mentions[0].variation, "al");
    assert_eq!(report.mentions[0].matched_text, "Al");

    assert_eq!(report.assigned_tasks.len(), 1);
    assert_eq!(report.assigned_tasks[0].task, "Review the deck");
    assert_eq!(report.assigned_tasks[0].assigned_to, "Al");
}

#[test]
fn test_scenario_absent_name_returns_none() {
    // Scenario: username with no occurrences anywhere
    let segments = vec![segment(DEFAULT_SPEAKER, "Nothing about that person.")];
    let result = tracker().track(
        "Zelda",
        "Nothing about that person. Just ordinary chatter.",
        &segments,
        true,
    );

    assert!(result.is_none());
}

#[test]
fn test_dedup_gap_property() {
    // Full name, first name, and initials all hit around the same offsets;
    // retained mentions must respect the 5-byte gap.
    let transcript = "Jane Doe opened. Then Jane continued, and JD closed the meeting. \
                      Jane Doe wrapped up with Jane for the record.";
    let report = tracker().track("Jane Doe", transcript, &[], false).unwrap();

    assert!(report.mention_count >= 2);
    for pair in report.mentions.windows(2) {
        assert!(
            pair[1].position >= pair[0].end_position + 5,
            "mentions {}..{} and {}..{} violate the gap",
            pair[0].position,
            pair[0].end_position,
            pair[1].position,
            pair[1].end_position
        );
    }
}

#[test]
fn test_highlight_round_trip_property() {
    let transcript = "Omar presents first. After Omar, the floor opens.\n\
                      Omar takes questions at the end.";
    let report = tracker().track("Omar", transcript, &[], false).unwrap();

    let restored = report
        .highlight_transcript
        .replace(MENTION_OPEN, "")
        .replace(MENTION_CLOSE, "");

    assert_eq!(restored, transcript);
    assert_eq!(
        report.highlight_transcript.matches(MENTION_OPEN).count(),
        report.mention_count
    );
}

#[test]
fn test_mentions_sorted_ascending() {
    let transcript = "Omar presents first. After Omar, the floor opens. Omar takes questions.";
    let report = tracker().track("Omar", transcript, &[], false).unwrap();

    for pair in report.mentions.windows(2) {
        assert!(pair[0].position < pair[1].position);
    }
}

#[test]
fn test_sentence_groups_contain_their_mentions() {
    let transcript = "Budget review went fine. Lena must sign off this week.\nLena agreed to that.";
    let report = tracker().track("Lena", transcript, &[], false).unwrap();

    assert_eq!(report.sentence_count, 2);
    assert_eq!(report.sentence_count, report.sentences_with_mentions.len());

    for group in &report.sentences_with_mentions {
        assert_eq!(group.mention_count, group.mentions.len());
        for m in &group.mentions {
            let slice = &group.sentence[m.position_in_sentence..m.position_in_sentence + m.text.len()];
            assert_eq!(slice, m.text);
        }
    }
}

#[test]
fn test_case_insensitive_whole_word_matching() {
    let report = tracker()
        .track("maria", "MARIA spoke. Then maria answered. Marianne did not.", &[], false)
        .unwrap();

    assert_eq!(report.mention_count, 2);
    assert_eq!(report.mentions[0].matched_text, "MARIA");
    assert_eq!(report.mentions[1].matched_text, "maria");
}

#[test]
fn test_context_window_clamped_to_bounds() {
    let transcript = "Ava leads.";
    let report = tracker().track("Ava", transcript, &[], false).unwrap();

    assert_eq!(report.mentions[0].context, "Ava leads.");
}

#[test]
fn test_speaker_mentions_only_with_diarization() {
    let segments = vec![
        segment("Speaker_2_Noah", "I can take the writeup."),
        segment("Speaker_1", "Fine by me."),
    ];
    let transcript = "Noah, will you send the writeup after?";

    let with_diarization = tracker().track("Noah", transcript, &segments, true).unwrap();
    assert_eq!(with_diarization.speaker_mentions.len(), 1);
    assert_eq!(with_diarization.speaker_mentions[0].speaker, "Speaker_2_Noah");
    assert_eq!(with_diarization.speaker_mentions[0].segment_index, 0);

    let without = tracker().track("Noah", transcript, &segments, false).unwrap();
    assert!(without.speaker_mentions.is_empty());
}

#[test]
fn test_engagement_level_scales_with_mentions() {
    let one = "Iris joined late.";
    let report = tracker().track("Iris", one, &[], false).unwrap();
    assert_eq!(report.engagement_level, EngagementLevel::Low);

    let many = "Iris spoke. ".repeat(12);
    let report = tracker().track("Iris", &many, &[], false).unwrap();
    assert_eq!(report.mention_count, 12);
    assert_eq!(report.engagement_level, EngagementLevel::Medium);
}

#[test]
fn test_multi_word_name_variations_all_match() {
    let transcript = "Jane Doe runs the sync. Ping Jane for details; JD has the doc.";
    let report = tracker().track("Jane Doe", transcript, &[], false).unwrap();

    let variations: Vec<&str> = report
        .mentions
        .iter()
        .map(|m| m.variation.as_str())
        .collect();

    assert!(variations.contains(&"jane doe"));
    assert!(variations.contains(&"jane"));
    assert!(variations.contains(&"jd"));
}
