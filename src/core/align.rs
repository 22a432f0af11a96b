//! Interval alignment of transcription segments with diarization intervals.
//!
//! Merges two independently produced timelines into one speaker-attributed
//! segment sequence. Selection is first-overlap, not best-overlap: for each
//! transcription segment the diarization intervals are scanned in input
//! order and the first one with strict temporal overlap wins.

use tracing::debug;

use crate::domain::{DiarizationInterval, Segment, TranscribedSegment, DEFAULT_SPEAKER};

/// Merge transcription segments with diarization speaker labels.
///
/// Pure function; never fails. With no diarization intervals, or none
/// overlapping a given segment, the segment gets [`DEFAULT_SPEAKER`].
///
/// Linear scan per segment — O(segments × intervals). Single-meeting
/// inputs are in the hundreds, so no interval tree is warranted.
pub fn align(segments: &[TranscribedSegment], diarization: &[DiarizationInterval]) -> Vec<Segment> {
    if diarization.is_empty() {
        debug!("No diarization data available, using generic speaker labels");
    }

    segments
        .iter()
        .map(|seg| {
            let speaker = diarization
                .iter()
                .find(|dia| dia.start < seg.end && dia.end > seg.start)
                .map(|dia| dia.speaker.clone())
                .unwrap_or_else(|| DEFAULT_SPEAKER.to_string());

            Segment {
                start: seg.start,
                end: seg.end,
                text: seg.text.clone(),
                speaker,
            }
        })
        .collect()
}
