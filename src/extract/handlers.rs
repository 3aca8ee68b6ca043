//! Parse handlers: buffering (batch) and streaming (push-to-sinks)

use tracing::trace;

use crate::error::Result;
use crate::extract::filter::{ContentFilter, OffsetTracker};
use crate::extract::pipeline::TagContentHandler;
use crate::io::sink::MatchSink;
use crate::types::SequenceMatch;

/// Batch handler: accumulates every match into an ordered buffer.
///
/// Offsets restart at each qualifying content fragment (`base = 0` on every
/// scan); no running offset is carried across fragments or tags. The buffer
/// is in document order of tag occurrence and, within a fragment, in
/// left-to-right match order.
pub struct BufferHandler<'a> {
    filter: &'a ContentFilter,
    tag: Option<String>,
    matches: Vec<SequenceMatch>,
}

impl<'a> BufferHandler<'a> {
    /// Create a buffering handler over a compiled filter
    pub fn new(filter: &'a ContentFilter) -> Self {
        Self {
            filter,
            tag: None,
            matches: Vec::new(),
        }
    }

    /// Consume the handler, yielding the ordered result sequence
    pub fn into_matches(self) -> Vec<SequenceMatch> {
        self.matches
    }
}

impl TagContentHandler for BufferHandler<'_> {
    fn start_tag(&mut self, name: &str) {
        self.tag = Some(name.to_string());
    }

    fn text(&mut self, content: &str) -> Result<()> {
        if let Some(tag) = &self.tag {
            if let Some(found) = self.filter.scan_at(tag, content, 0) {
                self.matches.extend(found);
            }
        }
        Ok(())
    }
}

/// Streaming handler: pushes each match to every registered sink as it is
/// discovered, never materializing the result set.
///
/// Offsets are cumulative: the tracker advances by the length of every
/// qualifying content fragment, whether or not it produced matches, so
/// positions are relative to the concatenated text of all qualifying tag
/// content since stream start. Not offset-compatible with batch results.
///
/// Sinks are push-only consumers with no backpressure signal and receive
/// records in registration order. No end-of-stream callback is issued;
/// sinks finalize through their own drop/flush discipline. A parse failure
/// aborts the run after whatever matches were already delivered.
pub struct StreamHandler<'a> {
    filter: &'a ContentFilter,
    sinks: &'a mut [Box<dyn MatchSink>],
    tag: Option<String>,
    offsets: OffsetTracker,
}

impl<'a> StreamHandler<'a> {
    /// Create a streaming handler fanning out to `sinks`
    pub fn new(filter: &'a ContentFilter, sinks: &'a mut [Box<dyn MatchSink>]) -> Self {
        Self {
            filter,
            sinks,
            tag: None,
            offsets: OffsetTracker::new(),
        }
    }
}

impl TagContentHandler for StreamHandler<'_> {
    fn start_tag(&mut self, name: &str) {
        self.tag = Some(name.to_string());
    }

    fn text(&mut self, content: &str) -> Result<()> {
        let Some(tag) = &self.tag else {
            return Ok(());
        };
        let Some(found) = self.filter.scan_at(tag, content, self.offsets.value()) else {
            return Ok(());
        };

        // Qualifying content advances the stream position even when it
        // produced no matches.
        self.offsets.advance(content.len());

        for record in &found {
            trace!(
                "match '{}' at {}-{}",
                record.sequence,
                record.start,
                record.end
            );
            for sink in self.sinks.iter_mut() {
                sink.accept(record)?;
            }
        }
        Ok(())
    }
}
