//! Query façade: the public entry points tying fetch, parse, and output
//! together
//!
//! Order of operations is fixed: compile both patterns (fail fast, before
//! any I/O), fetch through the [`Fetcher`] collaborator (whose
//! classification is authoritative; on failure no parsing happens at all),
//! then drive the pipeline with the mode's handler.
//!
//! Batch and streaming results are NOT offset-compatible: batch offsets
//! restart at each qualifying content fragment, streaming offsets
//! accumulate over all qualifying content since stream start. Callers must
//! not assume a shared origin.

use std::io::BufReader;

use tracing::{debug, info};

use crate::error::Result;
use crate::extract::{run_parser, BufferHandler, ContentFilter, StreamHandler};
use crate::io::network::{EntrezClient, Fetcher};
use crate::io::sink::MatchSink;
use crate::types::SequenceMatch;

/// Default byte-chunk size for streaming queries
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Fetch a record and return every content match, fully buffered.
///
/// Offsets restart at each qualifying content fragment.
///
/// # Example
///
/// ```no_run
/// # fn main() -> seqscan::Result<()> {
/// let matches = seqscan::query("nucleotide", "30271926", r"^TSeq_sequence$", "ATTAC")?;
/// for m in &matches {
///     println!("{} at {}-{}", m.sequence, m.start, m.end);
/// }
/// # Ok(())
/// # }
/// ```
pub fn query(
    db: &str,
    id: &str,
    tag_pattern: &str,
    content_pattern: &str,
) -> Result<Vec<SequenceMatch>> {
    let client = EntrezClient::new()?;
    query_with(&client, db, id, tag_pattern, content_pattern)
}

/// [`query`] over any fetch collaborator
pub fn query_with<F: Fetcher + ?Sized>(
    fetcher: &F,
    db: &str,
    id: &str,
    tag_pattern: &str,
    content_pattern: &str,
) -> Result<Vec<SequenceMatch>> {
    let filter = ContentFilter::new(tag_pattern, content_pattern)?;
    info!("querying db '{}' id '{}'", db, id);

    let body = fetcher.fetch(db, id)?;
    debug!("fetched {} byte response", body.len());

    let mut handler = BufferHandler::new(&filter);
    run_parser(&body[..], &mut handler)?;

    let matches = handler.into_matches();
    info!("{} match(es)", matches.len());
    Ok(matches)
}

/// Fetch a record incrementally, pushing each match to every sink as it is
/// found. Nothing is materialized: no return value, no result buffer.
///
/// Offsets accumulate over all qualifying content since stream start.
/// `chunk_size` controls how many response bytes are pulled per read
/// ([`DEFAULT_CHUNK_SIZE`] when in doubt). A parse failure aborts the run;
/// sinks keep whatever was already delivered.
pub fn query_stream(
    db: &str,
    id: &str,
    tag_pattern: &str,
    content_pattern: &str,
    sinks: &mut [Box<dyn MatchSink>],
    chunk_size: usize,
) -> Result<()> {
    let client = EntrezClient::new()?;
    query_stream_with(&client, db, id, tag_pattern, content_pattern, sinks, chunk_size)
}

/// [`query_stream`] over any fetch collaborator
pub fn query_stream_with<F: Fetcher + ?Sized>(
    fetcher: &F,
    db: &str,
    id: &str,
    tag_pattern: &str,
    content_pattern: &str,
    sinks: &mut [Box<dyn MatchSink>],
    chunk_size: usize,
) -> Result<()> {
    let filter = ContentFilter::new(tag_pattern, content_pattern)?;
    info!(
        "streaming query db '{}' id '{}' ({} byte chunks, {} sink(s))",
        db,
        id,
        chunk_size,
        sinks.len()
    );

    let body = fetcher.fetch_stream(db, id)?;
    let reader = BufReader::with_capacity(chunk_size, body);

    let mut handler = StreamHandler::new(&filter, sinks);
    run_parser(reader, &mut handler)
}
