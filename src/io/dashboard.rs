//! Live terminal dashboard sink (feature `dashboard`)
//!
//! UI plumbing only: a swappable [`MatchSink`] that keeps one status line
//! updated in place while a streaming query runs. It is entirely outside
//! the extraction pipeline and can be dropped from the build by disabling
//! the `dashboard` feature.

use std::io::{self, Write};
use std::time::Instant;

use crossterm::cursor::MoveToColumn;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use crate::error::Result;
use crate::io::sink::MatchSink;
use crate::types::SequenceMatch;

/// Longest matched text shown on the status line before truncation
const DISPLAY_WIDTH: usize = 24;

/// Redraws a single status line (match count, last match, elapsed time) on
/// every accepted record, and prints a final summary when dropped.
pub struct DashboardSink {
    out: io::Stdout,
    count: u64,
    started: Instant,
}

impl DashboardSink {
    /// Create a dashboard writing to stdout
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            count: 0,
            started: Instant::now(),
        }
    }
}

impl Default for DashboardSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSink for DashboardSink {
    fn accept(&mut self, record: &SequenceMatch) -> Result<()> {
        self.count += 1;

        let shown: String = record.sequence.chars().take(DISPLAY_WIDTH).collect();

        self.out.queue(MoveToColumn(0))?;
        self.out.queue(Clear(ClearType::CurrentLine))?;
        write!(
            self.out,
            "matches: {}  last: {} ({}-{})  elapsed: {:.1}s",
            self.count,
            shown,
            record.start,
            record.end,
            self.started.elapsed().as_secs_f64()
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for DashboardSink {
    fn drop(&mut self) {
        let _ = writeln!(
            self.out,
            "\n{} match(es) in {:.1}s",
            self.count,
            self.started.elapsed().as_secs_f64()
        );
    }
}
