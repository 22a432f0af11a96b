//! Interval Alignment Integration Tests
//!
//! Tests for transcription/diarization merging and speaker fallback.

use recap::core::align;
use recap::domain::{DiarizationInterval, TranscribedSegment, DEFAULT_SPEAKER};

fn seg(start: f64, end: f64, text: &str) -> TranscribedSegment {
    TranscribedSegment {
        start,
        end,
        text: text.to_string(),
    }
}

fn dia(start: f64, end: f64, speaker: &str) -> DiarizationInterval {
    DiarizationInterval {
        start,
        end,
        speaker: speaker.to_string(),
    }
}

#[test]
fn test_empty_diarization_uses_default_label() {
    // Scenario: empty diarization list, two transcription segments
    let segments = vec![seg(0.0, 3.2, "Welcome everyone."), seg(3.2, 7.8, "Let's begin.")];

    let aligned = align(&segments, &[]);

    assert_eq!(aligned.len(), 2);
    assert_eq!(aligned[0].speaker, DEFAULT_SPEAKER);
    assert_eq!(aligned[1].speaker, DEFAULT_SPEAKER);
}

#[test]
fn test_speaker_is_never_absent() {
    let segments = vec![
        seg(0.0, 2.0, "a"),
        seg(2.0, 4.0, "b"),
        seg(10.0, 12.0, "c"),
    ];
    let intervals = vec![dia(0.0, 3.0, "SPEAKER_00"), dia(3.0, 5.0, "SPEAKER_01")];

    let aligned = align(&segments, &intervals);

    for segment in &aligned {
        assert!(
            segment.speaker == "SPEAKER_00"
                || segment.speaker == "SPEAKER_01"
                || segment.speaker == DEFAULT_SPEAKER
        );
        assert!(!segment.speaker.is_empty());
    }
    // The segment past all intervals falls back
    assert_eq!(aligned[2].speaker, DEFAULT_SPEAKER);
}

#[test]
fn test_first_overlapping_interval_wins() {
    // Scenario: overlapping diarization intervals for a segment — the
    // first in input order with strict overlap is selected, not the one
    // with maximum overlap.
    let segments = vec![seg(2.0, 10.0, "contested span")];
    let intervals = vec![
        dia(0.0, 2.5, "SPEAKER_BRIEF"),
        dia(2.5, 10.0, "SPEAKER_DOMINANT"),
    ];

    let aligned = align(&segments, &intervals);
    assert_eq!(aligned[0].speaker, "SPEAKER_BRIEF");
}

#[test]
fn test_strict_overlap_excludes_touching_intervals() {
    let segments = vec![seg(5.0, 8.0, "text")];
    // Ends exactly where the segment starts, and starts exactly where it ends
    let intervals = vec![dia(0.0, 5.0, "BEFORE"), dia(8.0, 12.0, "AFTER")];

    let aligned = align(&segments, &intervals);
    assert_eq!(aligned[0].speaker, DEFAULT_SPEAKER);
}

#[test]
fn test_alignment_preserves_times_and_text() {
    let segments = vec![seg(1.25, 4.75, "exact payload")];
    let intervals = vec![dia(0.0, 10.0, "SPEAKER_00")];

    let aligned = align(&segments, &intervals);
    assert_eq!(aligned[0].start, 1.25);
    assert_eq!(aligned[0].end, 4.75);
    assert_eq!(aligned[0].text, "exact payload");
}

#[test]
fn test_alignment_is_pure() {
    let segments = vec![seg(0.0, 2.0, "same"), seg(2.0, 4.0, "input")];
    let intervals = vec![dia(1.0, 3.0, "SPEAKER_00")];

    let first = align(&segments, &intervals);
    let second = align(&segments, &intervals);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.speaker, b.speaker);
        assert_eq!(a.text, b.text);
    }
}
