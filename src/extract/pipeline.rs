//! Pipeline driver: pulls XML events from a byte source and notifies a
//! handler of start-tag and character-data events

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;

/// Callbacks dispatched by [`run_parser`] as the document is tokenized.
///
/// This is the seam between the incremental tokenizer and the two parse
/// handlers. Character data MAY arrive in several `text` calls for one
/// logical text node; implementations must not assume coalescing, and
/// matches spanning two calls are not found (a documented limitation of
/// streaming extraction, not a guarantee to work around).
pub trait TagContentHandler {
    /// A start tag (or empty element) was seen; `name` becomes the current
    /// tag context until the next start tag. The context is overwritten,
    /// never cleared: character data following an end tag still sees the
    /// most recent start tag's name.
    fn start_tag(&mut self, name: &str);

    /// A fragment of character data was seen under the current tag context.
    fn text(&mut self, content: &str) -> Result<()>;
}

/// Drive an incremental parse of `reader`, dispatching events to `handler`
/// until the input is exhausted.
///
/// One cooperative, single-threaded pull loop: each iteration pulls from
/// the underlying reader as needed, then dispatches zero or more handler
/// callbacks synchronously before pulling again. Chunked delivery is the
/// reader's concern; wrap a network body in
/// `BufReader::with_capacity(chunk_size, body)` to control it.
///
/// Tokenizer errors abort the drive and propagate as
/// [`crate::SeqscanError::Parse`]; there is no recovery and no partial
/// result from this function. No end-of-document signal is sent to the
/// handler beyond this function returning.
pub fn run_parser<R: BufRead, H: TagContentHandler>(reader: R, handler: &mut H) -> Result<()> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(false);

    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => {
                handler.start_tag(&String::from_utf8_lossy(e.name().as_ref()));
            }
            Event::Text(e) => {
                let content = e.unescape()?;
                handler.text(&content)?;
            }
            Event::CData(e) => {
                handler.text(&String::from_utf8_lossy(&e.into_inner()))?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
