//! I/O module: the NCBI HTTP collaborator and output sinks
//!
//! Everything here is plumbing around the extraction pipeline in
//! [`crate::extract`]: fetching response bodies (full or chunked) with
//! NCBI-specific error classification, and push-only consumers for the
//! matches the pipeline produces.

pub mod network;
pub mod sink;

pub use network::{efetch_url, EntrezClient, Fetcher};
pub use sink::{CollectSink, CsvSink, MatchSink, TextSink};

#[cfg(feature = "dashboard")]
pub mod dashboard;
#[cfg(feature = "dashboard")]
pub use dashboard::DashboardSink;
