//! Sink that records primitives instead of rendering them

use super::DocumentSink;
use crate::error::Result;

/// Open/close pair kinds understood by [`DocumentSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Head,
    Title,
    Body,
    Section,
    SectionTitle,
    Paragraph,
    List,
    ListItem,
    Bold,
    Italic,
    Monospaced,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Open(Scope),
    OpenLink(String),
    Close(Scope),
    Figure(String),
    Text(String),
    Flush,
    Finish,
}

/// List item as seen in the recorded outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    /// Number of lists open when the item was opened
    pub depth: usize,
    /// Index of the enclosing item, if any
    pub parent: Option<usize>,
    /// Text written directly into the item, nested items excluded
    pub text: String,
}

/// Records every sink call and tracks scope balance.
///
/// Used to inspect the structure of a report without parsing markup.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
    stack: Vec<Scope>,
    mismatches: usize,
    list_depth: usize,
    max_list_depth: usize,
    items: Vec<OutlineItem>,
    item_stack: Vec<usize>,
    closed: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn items(&self) -> &[OutlineItem] {
        &self.items
    }

    /// Lists currently open
    pub fn list_depth(&self) -> usize {
        self.list_depth
    }

    pub fn max_list_depth(&self) -> usize {
        self.max_list_depth
    }

    /// Scopes still open, outermost first
    pub fn open_scopes(&self) -> &[Scope] {
        &self.stack
    }

    /// Closes that did not match the innermost open scope
    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty() && self.mismatches == 0
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn count_opened(&self, scope: Scope) -> usize {
        self.events
            .iter()
            .filter(|event| match event {
                SinkEvent::Open(s) => *s == scope,
                SinkEvent::OpenLink(_) => scope == Scope::Link,
                _ => false,
            })
            .count()
    }

    /// Text of every item in document order, indented two spaces per list
    pub fn outline(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "{}{}",
                    "  ".repeat(item.depth.saturating_sub(1)),
                    item.text.trim()
                )
            })
            .collect()
    }

    fn open(&mut self, scope: Scope) {
        self.events.push(SinkEvent::Open(scope));
        self.enter(scope);
    }

    fn enter(&mut self, scope: Scope) {
        self.stack.push(scope);
        match scope {
            Scope::List => {
                self.list_depth += 1;
                self.max_list_depth = self.max_list_depth.max(self.list_depth);
            }
            Scope::ListItem => {
                self.items.push(OutlineItem {
                    depth: self.list_depth,
                    parent: self.item_stack.last().copied(),
                    text: String::new(),
                });
                self.item_stack.push(self.items.len() - 1);
            }
            _ => {}
        }
    }

    fn close_scope(&mut self, scope: Scope) {
        self.events.push(SinkEvent::Close(scope));
        if self.stack.last() == Some(&scope) {
            self.stack.pop();
        } else {
            self.mismatches += 1;
            return;
        }
        match scope {
            Scope::List => self.list_depth -= 1,
            Scope::ListItem => {
                self.item_stack.pop();
            }
            _ => {}
        }
    }
}

impl DocumentSink for RecordingSink {
    fn open_head(&mut self) {
        self.open(Scope::Head);
    }

    fn close_head(&mut self) {
        self.close_scope(Scope::Head);
    }

    fn open_title(&mut self) {
        self.open(Scope::Title);
    }

    fn close_title(&mut self) {
        self.close_scope(Scope::Title);
    }

    fn open_body(&mut self) {
        self.open(Scope::Body);
    }

    fn close_body(&mut self) {
        self.close_scope(Scope::Body);
    }

    fn open_section(&mut self) {
        self.open(Scope::Section);
    }

    fn close_section(&mut self) {
        self.close_scope(Scope::Section);
    }

    fn open_section_title(&mut self) {
        self.open(Scope::SectionTitle);
    }

    fn close_section_title(&mut self) {
        self.close_scope(Scope::SectionTitle);
    }

    fn open_paragraph(&mut self) {
        self.open(Scope::Paragraph);
    }

    fn close_paragraph(&mut self) {
        self.close_scope(Scope::Paragraph);
    }

    fn open_list(&mut self) {
        self.open(Scope::List);
    }

    fn close_list(&mut self) {
        self.close_scope(Scope::List);
    }

    fn open_list_item(&mut self) {
        self.open(Scope::ListItem);
    }

    fn close_list_item(&mut self) {
        self.close_scope(Scope::ListItem);
    }

    fn open_bold(&mut self) {
        self.open(Scope::Bold);
    }

    fn close_bold(&mut self) {
        self.close_scope(Scope::Bold);
    }

    fn open_italic(&mut self) {
        self.open(Scope::Italic);
    }

    fn close_italic(&mut self) {
        self.close_scope(Scope::Italic);
    }

    fn open_monospaced(&mut self) {
        self.open(Scope::Monospaced);
    }

    fn close_monospaced(&mut self) {
        self.close_scope(Scope::Monospaced);
    }

    fn figure(&mut self, src: &str) {
        self.events.push(SinkEvent::Figure(src.to_string()));
    }

    fn open_link(&mut self, href: &str) {
        self.events.push(SinkEvent::OpenLink(href.to_string()));
        self.enter(Scope::Link);
    }

    fn close_link(&mut self) {
        self.close_scope(Scope::Link);
    }

    fn text(&mut self, text: &str) {
        self.events.push(SinkEvent::Text(text.to_string()));
        if let Some(&index) = self.item_stack.last() {
            self.items[index].text.push_str(text);
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.events.push(SinkEvent::Flush);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.events.push(SinkEvent::Finish);
            self.closed = true;
        }
        Ok(())
    }
}
