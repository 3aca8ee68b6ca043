//! Output sinks for streaming match delivery
//!
//! A sink is a push-only consumer of [`SequenceMatch`] records. The stream
//! handler hands every record to every registered sink, in registration
//! order, with no backpressure and no end-of-stream callback: sinks that
//! hold resources (an open file, a terminal line) finalize through their
//! own drop discipline.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::types::SequenceMatch;

/// A push-only consumer of match records
pub trait MatchSink {
    /// Accept one record. Errors abort the pipeline run.
    fn accept(&mut self, record: &SequenceMatch) -> Result<()>;
}

/// Writes each record as a tab-separated `sequence<TAB>start<TAB>end` line
pub struct TextSink<W: Write> {
    out: W,
}

impl TextSink<io::Stdout> {
    /// The console printer
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextSink<W> {
    /// Wrap any writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MatchSink for TextSink<W> {
    fn accept(&mut self, record: &SequenceMatch) -> Result<()> {
        writeln!(
            self.out,
            "{}\t{}\t{}",
            record.sequence, record.start, record.end
        )?;
        Ok(())
    }
}

/// Writes records to a CSV file with the fixed header
/// `matched_sequence,start_pos,end_pos`.
///
/// The header is written when the sink is created, so an empty result still
/// produces a well-formed file. Buffered output is flushed when the sink is
/// dropped.
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Create (or truncate) the file at `path` and write the header
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        writer.write_record(["matched_sequence", "start_pos", "end_pos"])?;
        Ok(Self { writer })
    }
}

impl MatchSink for CsvSink {
    fn accept(&mut self, record: &SequenceMatch) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }
}

/// Buffers records in memory.
///
/// Clones share one buffer, so a caller can keep a handle while the
/// pipeline owns another:
///
/// ```
/// use seqscan::{CollectSink, MatchSink, SequenceMatch};
///
/// # fn main() -> seqscan::Result<()> {
/// let collector = CollectSink::new();
/// let mut sink: Box<dyn MatchSink> = Box::new(collector.clone());
/// sink.accept(&SequenceMatch::new("AT".to_string(), 3, 4))?;
/// assert_eq!(collector.records().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    records: Arc<Mutex<Vec<SequenceMatch>>>,
}

impl CollectSink {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything collected so far
    pub fn records(&self) -> Vec<SequenceMatch> {
        self.records.lock().expect("collector lock poisoned").clone()
    }
}

impl MatchSink for CollectSink {
    fn accept(&mut self, record: &SequenceMatch) -> Result<()> {
        self.records
            .lock()
            .expect("collector lock poisoned")
            .push(record.clone());
        Ok(())
    }
}
