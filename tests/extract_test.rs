//! Integration tests for the extraction pipeline over fixture documents

use std::io::BufReader;

use seqscan::{
    run_parser, BufferHandler, CollectSink, ContentFilter, MatchSink, SequenceMatch, StreamHandler,
};

/// A TinySeq XML response the way NCBI efetch returns it
const TINYSEQ_FIXTURE: &str = r#"<?xml version="1.0"?>
<TSeqSet>
<TSeq>
  <TSeq_seqtype value="nucleotide"/>
  <TSeq_gi>30271926</TSeq_gi>
  <TSeq_taxid>227984</TSeq_taxid>
  <TSeq_orgname>SARS coronavirus</TSeq_orgname>
  <TSeq_defline>SARS coronavirus TOR2, complete genome</TSeq_defline>
  <TSeq_length>6</TSeq_length>
  <TSeq_sequence>CGATCC</TSeq_sequence>
</TSeq>
</TSeqSet>
"#;

fn batch_scan(doc: &str, tag_pattern: &str, content_pattern: &str) -> Vec<SequenceMatch> {
    let filter = ContentFilter::new(tag_pattern, content_pattern).expect("patterns must compile");
    let mut handler = BufferHandler::new(&filter);
    run_parser(doc.as_bytes(), &mut handler).expect("fixture must parse");
    handler.into_matches()
}

fn stream_scan(
    doc: &str,
    tag_pattern: &str,
    content_pattern: &str,
    chunk_size: usize,
) -> Vec<SequenceMatch> {
    let filter = ContentFilter::new(tag_pattern, content_pattern).expect("patterns must compile");
    let collector = CollectSink::new();
    let mut sinks: Vec<Box<dyn MatchSink>> = vec![Box::new(collector.clone())];
    let mut handler = StreamHandler::new(&filter, &mut sinks);
    let reader = BufReader::with_capacity(chunk_size, doc.as_bytes());
    run_parser(reader, &mut handler).expect("fixture must parse");
    collector.records()
}

#[test]
fn test_batch_scan_of_tinyseq_fixture() {
    let matches = batch_scan(TINYSEQ_FIXTURE, r"^TSeq_sequence$", "AT");
    assert_eq!(
        matches,
        vec![SequenceMatch::new("AT".to_string(), 3, 4)]
    );
}

#[test]
fn test_batch_scan_reports_every_nonoverlapping_match() {
    let doc = "<TSeq><TSeq_sequence>GATATC</TSeq_sequence></TSeq>";
    let matches = batch_scan(doc, r"^TSeq_sequence$", "AT");
    let positions: Vec<(usize, usize)> = matches.iter().map(|m| (m.start, m.end)).collect();
    assert_eq!(positions, vec![(2, 3), (4, 5)]);
}

#[test]
fn test_matched_text_is_the_substring_at_reported_positions() {
    let content = "CGATCC";
    let matches = batch_scan(TINYSEQ_FIXTURE, r"^TSeq_sequence$", "AT");
    for m in &matches {
        assert_eq!(&content[m.start - 1..m.end], m.sequence);
    }
}

#[test]
fn test_tag_selection_is_partial_match() {
    // "Seq" selects TSeq_sequence (and the other TSeq_* elements)
    let matches = batch_scan(TINYSEQ_FIXTURE, "Seq", "ATC");
    assert!(matches.iter().any(|m| m.sequence == "ATC"));
}

#[test]
fn test_unmatched_tag_selector_yields_no_matches() {
    let matches = batch_scan(TINYSEQ_FIXTURE, "^nonexistent$", ".");
    assert!(matches.is_empty());
}

#[test]
fn test_batch_scan_is_idempotent() {
    let first = batch_scan(TINYSEQ_FIXTURE, r"^TSeq_sequence$", "C+");
    let second = batch_scan(TINYSEQ_FIXTURE, r"^TSeq_sequence$", "C+");
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_streaming_offsets_accumulate_across_elements() {
    let doc = "<TSeqSet><TSeq><TSeq_sequence>GATATC</TSeq_sequence><TSeq_sequence>ATAT</TSeq_sequence></TSeq></TSeqSet>";
    let records = stream_scan(doc, r"^TSeq_sequence$", "AT", 8192);
    let positions: Vec<(usize, usize)> = records.iter().map(|m| (m.start, m.end)).collect();
    assert_eq!(positions, vec![(2, 3), (4, 5), (7, 8), (9, 10)]);
}

#[test]
fn test_streaming_offsets_count_stale_context_whitespace() {
    // The tag context is overwritten, never cleared: the newline after the
    // first </seq> is scanned under the stale "seq" context and advances
    // the stream position.
    let doc = "<a><seq>AT</seq>\n<seq>AT</seq></a>";
    let records = stream_scan(doc, "^seq$", "AT", 8192);
    let positions: Vec<(usize, usize)> = records.iter().map(|m| (m.start, m.end)).collect();
    assert_eq!(positions, vec![(1, 2), (4, 5)]);
}

#[test]
fn test_streaming_results_do_not_depend_on_chunk_boundaries() {
    let doc = "<TSeqSet><TSeq><TSeq_sequence>GATATCGGATCGAT</TSeq_sequence></TSeq></TSeqSet>";
    let whole = stream_scan(doc, r"^TSeq_sequence$", "AT", doc.len());
    for chunk_size in [1, 3, 7, 16] {
        assert_eq!(stream_scan(doc, r"^TSeq_sequence$", "AT", chunk_size), whole);
    }
}

#[test]
fn test_streaming_and_batch_agree_on_matched_text() {
    let batch = batch_scan(TINYSEQ_FIXTURE, r"^TSeq_sequence$", "AT");
    let stream = stream_scan(TINYSEQ_FIXTURE, r"^TSeq_sequence$", "AT", 16);
    let batch_text: Vec<&str> = batch.iter().map(|m| m.sequence.as_str()).collect();
    let stream_text: Vec<&str> = stream.iter().map(|m| m.sequence.as_str()).collect();
    assert_eq!(batch_text, stream_text);
}

#[test]
fn test_malformed_document_fails_the_batch_scan() {
    let filter = ContentFilter::new(".*", "AT").unwrap();
    let mut handler = BufferHandler::new(&filter);
    assert!(run_parser("<TSeq><TSeq_sequence>GAT".as_bytes(), &mut handler).is_err());
}

#[test]
fn test_parse_failure_keeps_matches_already_streamed() {
    // Streaming has already delivered matches found before the failure
    // point; partial delivery is accepted, not masked.
    let doc = "<a><seq>GATATC</seq><oops></a>";
    let filter = ContentFilter::new("^seq$", "AT").unwrap();
    let collector = CollectSink::new();
    let mut sinks: Vec<Box<dyn MatchSink>> = vec![Box::new(collector.clone())];
    let mut handler = StreamHandler::new(&filter, &mut sinks);
    assert!(run_parser(doc.as_bytes(), &mut handler).is_err());
    assert_eq!(collector.records().len(), 2);
}
