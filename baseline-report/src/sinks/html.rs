//! HTML sink for site reports

use super::DocumentSink;
use crate::error::Result;
use crate::utils::escape_html;
use std::io::Write;

/// Sink that renders XHTML-style markup into any writer.
///
/// Markup is buffered and written on [`DocumentSink::flush`] or
/// [`DocumentSink::close`].
pub struct HtmlSink<W: Write> {
    writer: W,
    buffer: String,
    closed: bool,
}

impl<W: Write> HtmlSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: String::with_capacity(4096),
            closed: false,
        }
    }

    /// Markup produced since the last flush
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Recover the writer; buffered markup that was never flushed is dropped
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn push(&mut self, markup: &str) {
        self.buffer.push_str(markup);
    }
}

impl<W: Write> DocumentSink for HtmlSink<W> {
    fn open_head(&mut self) {
        self.push("<!DOCTYPE html>\n<html>\n<head>\n");
    }

    fn close_head(&mut self) {
        self.push("</head>\n");
    }

    fn open_title(&mut self) {
        self.push("<title>");
    }

    fn close_title(&mut self) {
        self.push("</title>\n");
    }

    fn open_body(&mut self) {
        self.push("<body>\n");
    }

    fn close_body(&mut self) {
        self.push("</body>\n</html>\n");
    }

    fn open_section(&mut self) {
        self.push("<div class=\"section\">\n");
    }

    fn close_section(&mut self) {
        self.push("</div>\n");
    }

    fn open_section_title(&mut self) {
        self.push("<h2>");
    }

    fn close_section_title(&mut self) {
        self.push("</h2>\n");
    }

    fn open_paragraph(&mut self) {
        self.push("<p>");
    }

    fn close_paragraph(&mut self) {
        self.push("</p>\n");
    }

    fn open_list(&mut self) {
        self.push("<ul>\n");
    }

    fn close_list(&mut self) {
        self.push("</ul>\n");
    }

    fn open_list_item(&mut self) {
        self.push("<li>");
    }

    fn close_list_item(&mut self) {
        self.push("</li>\n");
    }

    fn open_bold(&mut self) {
        self.push("<b>");
    }

    fn close_bold(&mut self) {
        self.push("</b>");
    }

    fn open_italic(&mut self) {
        self.push("<i>");
    }

    fn close_italic(&mut self) {
        self.push("</i>");
    }

    fn open_monospaced(&mut self) {
        self.push("<code>");
    }

    fn close_monospaced(&mut self) {
        self.push("</code>");
    }

    fn figure(&mut self, src: &str) {
        let markup = format!("<img src=\"{}\" alt=\"\" />", escape_html(src));
        self.push(&markup);
    }

    fn open_link(&mut self, href: &str) {
        let markup = format!("<a href=\"{}\">", escape_html(href));
        self.push(&markup);
    }

    fn close_link(&mut self) {
        self.push("</a>");
    }

    fn text(&mut self, text: &str) {
        let escaped = escape_html(text);
        self.push(&escaped);
    }

    fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.writer.write_all(self.buffer.as_bytes())?;
            self.buffer.clear();
        }
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.flush()?;
        self.closed = true;
        Ok(())
    }
}
