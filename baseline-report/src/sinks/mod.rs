//! Structured document sinks
//!
//! The renderer only talks to [`DocumentSink`]; each backend decides what
//! the primitives look like on disk.

use crate::error::Result;

/// Structured-output target driven by the outline renderer.
///
/// Primitives come in open/close pairs and are expected to be called in
/// strict last-opened-first-closed order. Sinks do not validate nesting.
pub trait DocumentSink {
    fn open_head(&mut self);
    fn close_head(&mut self);

    fn open_title(&mut self);
    fn close_title(&mut self);

    fn open_body(&mut self);
    fn close_body(&mut self);

    fn open_section(&mut self);
    fn close_section(&mut self);

    fn open_section_title(&mut self);
    fn close_section_title(&mut self);

    fn open_paragraph(&mut self);
    fn close_paragraph(&mut self);

    fn open_list(&mut self);
    fn close_list(&mut self);

    fn open_list_item(&mut self);
    fn close_list_item(&mut self);

    fn open_bold(&mut self);
    fn close_bold(&mut self);

    fn open_italic(&mut self);
    fn close_italic(&mut self);

    fn open_monospaced(&mut self);
    fn close_monospaced(&mut self);

    /// Inline image reference by relative path
    fn figure(&mut self, src: &str);

    fn open_link(&mut self, href: &str);
    fn close_link(&mut self);

    fn text(&mut self, text: &str);

    /// Push buffered output to the underlying writer
    fn flush(&mut self) -> Result<()>;

    /// Finish the document; calling it again is a no-op
    fn close(&mut self) -> Result<()>;
}

pub mod html;
pub mod markdown;
pub mod recording;

pub use html::HtmlSink;
pub use markdown::MarkdownSink;
pub use recording::{OutlineItem, RecordingSink, Scope, SinkEvent};
