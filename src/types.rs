//! Common types used throughout seqscan

use serde::Serialize;

/// A single content match inside a qualifying XML element.
///
/// Offsets are 1-based and inclusive on both ends, following bioinformatics
/// sequence-coordinate convention rather than zero-based indexing. For a
/// match of the content pattern at zero-based byte range `[s, e)` of the
/// scanned text, `start = s + 1 + base` and `end = e + base`, where `base`
/// is the cumulative stream offset (0 outside streaming mode).
///
/// The serde field names match the CSV output schema
/// (`matched_sequence,start_pos,end_pos`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceMatch {
    /// The exact matched substring
    #[serde(rename = "matched_sequence")]
    pub sequence: String,
    /// 1-based inclusive start position
    #[serde(rename = "start_pos")]
    pub start: usize,
    /// 1-based inclusive end position
    #[serde(rename = "end_pos")]
    pub end: usize,
}

impl SequenceMatch {
    /// Create a new sequence match
    pub fn new(sequence: String, start: usize, end: usize) -> Self {
        Self { sequence, start, end }
    }
}
