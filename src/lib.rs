//! seqscan: stream NCBI sequence records and scan XML content with
//! regular expressions
//!
//! # Overview
//!
//! seqscan fetches a sequence record from NCBI E-utilities, incrementally
//! parses the XML response, and extracts substrings from element content
//! using two patterns: a tag selector (which elements to inspect) and a
//! content pattern (what to extract from their text). Matches are reported
//! as `(matched_text, start, end)` with 1-based inclusive offsets, per
//! bioinformatics convention.
//!
//! Two modes share one pipeline:
//!
//! - **Batch** ([`query()`]): the whole response is fetched, parsed, and
//!   the ordered match list returned. Offsets restart at each qualifying
//!   content fragment.
//! - **Streaming** ([`query_stream()`]): the response is parsed as it
//!   arrives and each match is pushed to registered [`MatchSink`]s
//!   immediately, with constant memory. Offsets accumulate over all
//!   qualifying content since stream start. Matches that would span a
//!   fragment boundary are not found; this is a documented limitation.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> seqscan::Result<()> {
//! // Find every "CAT" in the sequence of nucleotide record 30271926
//! let matches = seqscan::query("nucleotide", "30271926", r"^TSeq_sequence$", "CAT")?;
//! for m in &matches {
//!     println!("{}\t{}\t{}", m.sequence, m.start, m.end);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`extract`]: the extraction pipeline (tokenizer driver, content
//!   filter, batch/stream handlers)
//! - [`io`]: the NCBI HTTP collaborator and output sinks
//! - [`query`](mod@query): the public façade over both modes
//! - [`error`], [`types`]: shared error and record types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod extract;
pub mod io;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SeqscanError};
pub use extract::{
    run_parser, BufferHandler, ContentFilter, OffsetTracker, StreamHandler, TagContentHandler,
};
pub use io::network::{efetch_url, EntrezClient, Fetcher};
pub use io::sink::{CollectSink, CsvSink, MatchSink, TextSink};
pub use query::{query, query_stream, query_stream_with, query_with, DEFAULT_CHUNK_SIZE};
pub use types::SequenceMatch;

#[cfg(feature = "dashboard")]
pub use io::dashboard::DashboardSink;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
