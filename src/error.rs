//! Error types for seqscan

use thiserror::Error;

/// Result type alias for seqscan operations
pub type Result<T> = std::result::Result<T, SeqscanError>;

/// Error types that can occur in seqscan
#[derive(Debug, Error)]
pub enum SeqscanError {
    /// A supplied tag or content pattern failed to compile.
    ///
    /// Raised before any network or parse activity begins.
    #[error("invalid regular expression '{pattern}': {source}")]
    Pattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// The underlying compilation error
        source: regex::Error,
    },

    /// NCBI signalled a failed request: a non-200 status code, an embedded
    /// error element, or a response carrying no sequence data.
    #[error("NCBI request failed: {0}")]
    Request(String),

    /// Transport-level HTTP failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed XML aborted the parse
    #[error("XML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
