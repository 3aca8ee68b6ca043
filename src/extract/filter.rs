//! Tag-aware content filtering with compiled regular expression pairs

use regex::Regex;
use tracing::trace;

use crate::error::{Result, SeqscanError};
use crate::types::SequenceMatch;

/// The compiled pattern pair bound to one query invocation.
///
/// The tag selector decides which element names qualify; the content
/// pattern is scanned against qualifying element text. Both are compiled
/// once, before any network or parse activity, and are read-only for the
/// lifetime of the query.
///
/// # Offsets
///
/// Reported positions are 1-based and inclusive on both ends. Offsets are
/// byte offsets as reported by the regex engine; NCBI efetch sequence
/// payloads are ASCII, where byte and character positions coincide.
///
/// # Example
///
/// ```
/// use seqscan::ContentFilter;
///
/// # fn main() -> seqscan::Result<()> {
/// let filter = ContentFilter::new(r"^TSeq_sequence$", "AT")?;
/// let matches = filter.scan_at("TSeq_sequence", "CGATCC", 0).unwrap();
/// assert_eq!(matches.len(), 1);
/// assert_eq!((matches[0].start, matches[0].end), (3, 4));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ContentFilter {
    tag_selector: Regex,
    content: Regex,
}

impl ContentFilter {
    /// Compile a tag-selector pattern and a content pattern.
    ///
    /// The content pattern is wrapped in a single capturing group so the
    /// whole match is group 1. Either pattern failing to compile is a
    /// [`SeqscanError::Pattern`].
    pub fn new(tag_pattern: &str, content_pattern: &str) -> Result<Self> {
        let tag_selector = Regex::new(tag_pattern).map_err(|source| SeqscanError::Pattern {
            pattern: tag_pattern.to_string(),
            source,
        })?;
        let content =
            Regex::new(&format!("({})", content_pattern)).map_err(|source| SeqscanError::Pattern {
                pattern: content_pattern.to_string(),
                source,
            })?;
        Ok(Self { tag_selector, content })
    }

    /// Check whether an element name satisfies the tag selector.
    ///
    /// Substring search semantics, not a full-string match: a selector of
    /// `"Seq"` matches a tag named `"TSeq_sequence"`.
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.tag_selector.is_match(tag)
    }

    /// Scan one content fragment of the named element.
    ///
    /// Returns `None` when the tag does not qualify; callers must not
    /// advance any offset state in that case. Otherwise returns every
    /// non-overlapping match in left-to-right order (possibly none), with
    /// positions shifted by `base`: for a match at zero-based `[s, e)`,
    /// `start = s + 1 + base` and `end = e + base`. The asymmetric
    /// conversion yields 1-based inclusive positions on both ends.
    pub fn scan_at(&self, tag: &str, content: &str, base: usize) -> Option<Vec<SequenceMatch>> {
        if !self.matches_tag(tag) {
            return None;
        }

        let matches: Vec<SequenceMatch> = self
            .content
            .find_iter(content)
            .map(|m| {
                SequenceMatch::new(m.as_str().to_string(), m.start() + 1 + base, m.end() + base)
            })
            .collect();
        trace!(
            "scanned {} bytes in <{}>: {} match(es)",
            content.len(),
            tag,
            matches.len()
        );
        Some(matches)
    }
}

/// Cumulative count of content bytes consumed by one streaming run.
///
/// Owned exclusively by that run's handler: advanced after every qualifying
/// content fragment is scanned, regardless of match count; never reset
/// mid-run; discarded at run end. Gives matches stream-relative positions
/// despite chunked delivery.
#[derive(Debug, Default)]
pub struct OffsetTracker {
    consumed: usize,
}

impl OffsetTracker {
    /// Create a tracker starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bytes consumed so far
    pub fn value(&self) -> usize {
        self.consumed
    }

    /// Record `n` more bytes of scanned content
    pub fn advance(&mut self, n: usize) {
        self.consumed += n;
    }
}
