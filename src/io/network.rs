//! NCBI E-utilities HTTP collaborator
//!
//! Wraps the efetch endpoint with the error classification the query façade
//! depends on. NCBI is not strictly RESTful about failures: a missing
//! record can come back as a 200 with an embedded error element, or as a
//! tiny body with an empty sequence element, so a plain status check is not
//! enough.
//!
//! Classification rules:
//!
//! - non-200 status: hard failure; the diagnostic includes the text of any
//!   `ERROR` element found in the body.
//! - 200 with a full body under 1024 bytes: probe for an `Error` element
//!   (hard failure) or an absent/empty `TSeq_sequence` element (hard
//!   failure, "no sequence data"). Bodies at or above the threshold are
//!   taken as real sequence payloads. Content-Length is not always sent,
//!   so the buffered length is what is checked.
//! - streaming fetches classify on status alone; the body is never
//!   buffered.
//!
//! The [`Fetcher`] trait is the seam the façade calls through, so tests can
//! substitute a mock and prove no request is issued when pattern
//! compilation fails.

use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{Result, SeqscanError};

/// Base URL for NCBI E-utilities efetch
const EFETCH_BASE_URL: &str = "http://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Bodies shorter than this are probed for embedded errors despite a 200.
///
/// Real sequence payloads are far larger; NCBI's error and empty-record
/// responses fit well under it.
const ERROR_PROBE_THRESHOLD: usize = 1024;

/// Build the efetch URL for a database name and record id, requesting
/// XML-formatted FASTA-typed output.
///
/// # Example
///
/// ```
/// use seqscan::efetch_url;
///
/// assert_eq!(
///     efetch_url("nucleotide", "30271926"),
///     "http://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi?db=nucleotide&id=30271926&retmode=xml&rettype=fasta"
/// );
/// ```
pub fn efetch_url(db: &str, id: &str) -> String {
    format!(
        "{}?db={}&id={}&retmode=xml&rettype=fasta",
        EFETCH_BASE_URL, db, id
    )
}

/// The HTTP collaborator the query façade delegates to.
///
/// Both methods return only classified successes: any NCBI-level failure
/// surfaces as [`SeqscanError::Request`] and any transport failure as
/// [`SeqscanError::Network`] before the caller sees a byte.
pub trait Fetcher {
    /// Fetch and classify the full response body for a record
    fn fetch(&self, db: &str, id: &str) -> Result<Vec<u8>>;

    /// Fetch a record as a byte stream, classified by status code only
    fn fetch_stream(&self, db: &str, id: &str) -> Result<Box<dyn Read + Send>>;
}

/// Blocking HTTP client for NCBI E-utilities.
///
/// No timeout is enforced on fetches; the caller aborts by dropping the
/// stream or the process. Cheap to construct, one reqwest client per value.
#[derive(Debug, Clone)]
pub struct EntrezClient {
    client: Client,
}

impl EntrezClient {
    /// Create a client
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(None).build()?;
        Ok(Self { client })
    }
}

impl Fetcher for EntrezClient {
    fn fetch(&self, db: &str, id: &str) -> Result<Vec<u8>> {
        let url = efetch_url(db, id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        classify_response(status, &body)?;
        Ok(body)
    }

    fn fetch_stream(&self, db: &str, id: &str) -> Result<Box<dyn Read + Send>> {
        let url = efetch_url(db, id);
        debug!("GET {} (streaming)", url);
        let response = self.client.get(&url).send()?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.bytes()?.to_vec();
            return Err(status_failure(status, &body));
        }
        Ok(Box::new(response))
    }
}

/// Apply the full classification rules to a buffered response.
pub fn classify_response(status: u16, body: &[u8]) -> Result<()> {
    if status != 200 {
        return Err(status_failure(status, body));
    }
    if body.len() < ERROR_PROBE_THRESHOLD {
        if let Some(text) = find_element_text(body, "Error") {
            return Err(SeqscanError::Request(format!(
                "Error in NCBI response: {}",
                text
            )));
        }
        let sequence = find_element_text(body, "TSeq_sequence");
        if sequence.map_or(true, |s| s.is_empty()) {
            return Err(SeqscanError::Request(
                "No sequence data returned by NCBI for this DB and ID".to_string(),
            ));
        }
    }
    Ok(())
}

/// Build the hard failure for a non-200 response, quoting any `ERROR`
/// element text NCBI put in the body.
fn status_failure(status: u16, body: &[u8]) -> SeqscanError {
    let detail = match find_element_text(body, "ERROR") {
        Some(text) => format!("Message: {}", text),
        None => String::new(),
    };
    SeqscanError::Request(format!(
        "Received {} HTTP status code from NCBI. {}",
        status, detail
    ))
}

/// Find the text content of the first element named `name`.
///
/// Tolerant probe over possibly non-XML bodies: tokenizer errors end the
/// scan and report the element as absent.
fn find_element_text(body: &[u8], name: &str) -> Option<String> {
    let mut xml = Reader::from_reader(body);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut inside = false;
    let mut text = String::new();
    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == name.as_bytes() => inside = true,
            Ok(Event::Text(e)) if inside => {
                if let Ok(fragment) = e.unescape() {
                    text.push_str(&fragment);
                }
            }
            Ok(Event::End(e)) if inside && e.name().as_ref() == name.as_bytes() => {
                return Some(text);
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == name.as_bytes() => {
                return Some(String::new());
            }
            Ok(Event::Eof) | Err(_) => return if inside { Some(text) } else { None },
            _ => {}
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_message(result: Result<()>) -> String {
        match result.unwrap_err() {
            SeqscanError::Request(msg) => msg,
            other => panic!("expected Request error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_200_quotes_embedded_error_text() {
        let body = b"<eFetchResult><ERROR>Cannot prepare document</ERROR></eFetchResult>";
        let msg = request_message(classify_response(400, body));
        assert!(msg.contains("400"));
        assert!(msg.contains("Cannot prepare document"));
    }

    #[test]
    fn test_non_200_without_error_element() {
        let msg = request_message(classify_response(502, b"Bad Gateway"));
        assert!(msg.contains("502"));
        assert!(!msg.contains("Message:"));
    }

    #[test]
    fn test_200_with_error_element_is_a_failure() {
        let body = b"<eFetchResult><Error>ID list is empty</Error></eFetchResult>";
        let msg = request_message(classify_response(200, body));
        assert!(msg.contains("ID list is empty"));
    }

    #[test]
    fn test_200_with_empty_sequence_element_is_a_failure() {
        let body = b"<TSeq><TSeq_sequence></TSeq_sequence></TSeq>";
        let msg = request_message(classify_response(200, body));
        assert!(msg.contains("No sequence data"));
    }

    #[test]
    fn test_200_with_missing_sequence_element_is_a_failure() {
        let body = b"<TSeq><TSeq_taxid>9606</TSeq_taxid></TSeq>";
        let msg = request_message(classify_response(200, body));
        assert!(msg.contains("No sequence data"));
    }

    #[test]
    fn test_200_small_body_with_sequence_passes() {
        let body = b"<TSeq><TSeq_sequence>GATTACA</TSeq_sequence></TSeq>";
        assert!(classify_response(200, body).is_ok());
    }

    #[test]
    fn test_200_large_body_is_not_probed() {
        // Above the probe threshold the body is taken as a real payload
        let mut body = Vec::from(&b"<TSeqSet><TSeq><TSeq_sequence>"[..]);
        body.extend(std::iter::repeat(b'A').take(2000));
        body.extend_from_slice(b"</TSeq_sequence></TSeq></TSeqSet>");
        assert!(classify_response(200, &body).is_ok());
    }

    #[test]
    fn test_find_element_text_on_non_xml_body() {
        assert_eq!(find_element_text(b"plain text, not xml", "ERROR"), None);
    }
}
