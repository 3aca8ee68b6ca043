//! The extraction pipeline: incremental XML tokenization feeding a
//! tag-aware content filter
//!
//! Data flows in one direction on a single thread:
//!
//! ```text
//! byte source -> pipeline driver -> (start-tag, text) events
//!             -> content filter  -> SequenceMatch records
//!             -> result buffer (batch) | output sinks (streaming)
//! ```
//!
//! [`ContentFilter`] decides which elements qualify and extracts matches
//! from their text. [`BufferHandler`] accumulates an ordered result
//! sequence for batch queries; [`StreamHandler`] pushes each match to
//! registered sinks as it is found, tracking cumulative stream offsets with
//! an [`OffsetTracker`]. [`run_parser`] drives either handler from any
//! buffered byte source.

mod filter;
mod handlers;
mod pipeline;

pub use filter::{ContentFilter, OffsetTracker};
pub use handlers::{BufferHandler, StreamHandler};
pub use pipeline::{run_parser, TagContentHandler};
