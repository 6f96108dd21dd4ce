//! Markdown sink

use super::DocumentSink;
use crate::error::Result;
use crate::utils::escape_markdown;
use std::io::Write;

/// Sink producing CommonMark with nested `-` bullets, two spaces per level
pub struct MarkdownSink<W: Write> {
    writer: W,
    buffer: String,
    list_depth: usize,
    in_code: bool,
    links: Vec<String>,
    /// Buffer offsets just after each open emphasis marker
    emphasis: Vec<usize>,
    closed: bool,
}

impl<W: Write> MarkdownSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: String::with_capacity(4096),
            list_depth: 0,
            in_code: false,
            links: Vec::new(),
            emphasis: Vec::new(),
            closed: false,
        }
    }

    pub fn pending(&self) -> &str {
        &self.buffer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn open_emphasis(&mut self, marker: &str) {
        self.buffer.push_str(marker);
        self.emphasis.push(self.buffer.len());
    }

    /// An empty span is dropped along with its opening marker
    fn close_emphasis(&mut self, marker: &str) {
        match self.emphasis.pop() {
            Some(start) if start == self.buffer.len() => {
                self.buffer.truncate(start - marker.len());
            }
            _ => self.buffer.push_str(marker),
        }
    }

    fn ensure_line_start(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    fn ensure_blank_line(&mut self) {
        if self.buffer.is_empty() || self.buffer.ends_with("\n\n") {
            return;
        }
        if self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        } else {
            self.buffer.push_str("\n\n");
        }
    }
}

impl<W: Write> DocumentSink for MarkdownSink<W> {
    fn open_head(&mut self) {}

    fn close_head(&mut self) {
        self.ensure_blank_line();
    }

    fn open_title(&mut self) {
        self.ensure_line_start();
        self.buffer.push_str("# ");
    }

    fn close_title(&mut self) {
        self.buffer.push('\n');
    }

    fn open_body(&mut self) {}

    fn close_body(&mut self) {
        self.ensure_line_start();
    }

    fn open_section(&mut self) {
        self.ensure_blank_line();
    }

    fn close_section(&mut self) {
        self.ensure_blank_line();
    }

    fn open_section_title(&mut self) {
        self.ensure_blank_line();
        self.buffer.push_str("## ");
    }

    fn close_section_title(&mut self) {
        self.buffer.push_str("\n\n");
    }

    fn open_paragraph(&mut self) {
        self.ensure_blank_line();
    }

    fn close_paragraph(&mut self) {
        self.buffer.push_str("\n\n");
    }

    fn open_list(&mut self) {
        if self.list_depth == 0 {
            self.ensure_blank_line();
        }
        self.list_depth += 1;
    }

    fn close_list(&mut self) {
        self.list_depth = self.list_depth.saturating_sub(1);
        if self.list_depth == 0 {
            self.ensure_blank_line();
        }
    }

    fn open_list_item(&mut self) {
        self.ensure_line_start();
        let indent = "  ".repeat(self.list_depth.saturating_sub(1));
        self.buffer.push_str(&indent);
        self.buffer.push_str("- ");
    }

    fn close_list_item(&mut self) {
        self.ensure_line_start();
    }

    fn open_bold(&mut self) {
        self.open_emphasis("**");
    }

    fn close_bold(&mut self) {
        self.close_emphasis("**");
    }

    fn open_italic(&mut self) {
        self.open_emphasis("*");
    }

    fn close_italic(&mut self) {
        self.close_emphasis("*");
    }

    fn open_monospaced(&mut self) {
        self.buffer.push('`');
        self.in_code = true;
    }

    fn close_monospaced(&mut self) {
        self.buffer.push('`');
        self.in_code = false;
    }

    fn figure(&mut self, src: &str) {
        self.buffer.push_str("![](");
        self.buffer.push_str(src);
        self.buffer.push(')');
    }

    fn open_link(&mut self, href: &str) {
        self.buffer.push('[');
        self.links.push(href.to_string());
    }

    fn close_link(&mut self) {
        let href = self.links.pop().unwrap_or_default();
        self.buffer.push_str("](");
        self.buffer.push_str(&href);
        self.buffer.push(')');
    }

    fn text(&mut self, text: &str) {
        if self.in_code {
            self.buffer.push_str(text);
        } else {
            let escaped = escape_markdown(text);
            self.buffer.push_str(&escaped);
        }
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
