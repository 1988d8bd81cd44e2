//! Forward-only XML event cursor with pull-parser depth semantics.
//!
//! Depth rules:
//! - `StartDocument` and `EndDocument` report depth 0.
//! - A start tag reports the depth *after* entering it (the root is 1).
//! - An end tag reports the same depth as its start tag.
//! - A self-closing tag yields a start/end pair.

use std::fmt;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::attrs::{Attribute, AttributeSet};
use crate::error::ResourceError;

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EventKind {
    StartDocument,
    StartTag,
    EndTag,
    Text,
    EndDocument,
}

/// Minimal pull-parser interface the inflaters are written against.
pub trait XmlCursor {
    /// Kind of the event the cursor is positioned on.
    fn event(&self) -> EventKind;
    /// Local tag name for start/end tags.
    fn name(&self) -> Option<&str>;
    fn depth(&self) -> usize;
    /// Moves to the next event and returns its kind. Stays on `EndDocument` once reached.
    fn next(&mut self) -> Result<EventKind, ResourceError>;
    /// Attributes of the current start tag; empty for every other event.
    fn attributes(&self) -> &AttributeSet;
    /// Human-readable location of the current event, for error messages.
    fn position_description(&self) -> String;
}

#[derive(Debug, Clone)]
struct Token {
    kind: EventKind,
    name: Option<String>,
    depth: usize,
    attributes: AttributeSet,
    line: usize,
    col: usize,
}

/// Cursor over a fully tokenized document.
///
/// The whole source is tokenized up front, so malformed XML (including a
/// second top-level element) is reported by [`XmlPullCursor::parse`] rather
/// than partway through a walk.
#[derive(Debug, Clone)]
pub struct XmlPullCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl XmlPullCursor {
    pub fn parse(src: &str) -> Result<Self, ResourceError> {
        let tokens = Tokenizer::new(src).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }

    fn current(&self) -> &Token {
        // tokens always holds at least StartDocument and EndDocument
        &self.tokens[self.pos]
    }
}

impl XmlCursor for XmlPullCursor {
    fn event(&self) -> EventKind {
        self.current().kind
    }

    fn name(&self) -> Option<&str> {
        self.current().name.as_deref()
    }

    fn depth(&self) -> usize {
        self.current().depth
    }

    fn next(&mut self) -> Result<EventKind, ResourceError> {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        Ok(self.event())
    }

    fn attributes(&self) -> &AttributeSet {
        &self.current().attributes
    }

    fn position_description(&self) -> String {
        let tok = self.current();
        format!("line {}, column {}", tok.line, tok.col)
    }
}

// ── Tokenizer ─────────────────────────────────────────────────────────────

/// An open element and the `xmlns` declarations it introduced.
struct Scope {
    tag: String,
    namespaces: Vec<(String, String)>,
}

struct Tokenizer<'s> {
    src: &'s str,
    reader: Reader<&'s [u8]>,
    scopes: Vec<Scope>,
    tokens: Vec<Token>,
    root_seen: bool,
}

impl<'s> Tokenizer<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src,
            reader: Reader::from_str(src),
            scopes: Vec::new(),
            tokens: Vec::new(),
            root_seen: false,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ResourceError> {
        self.push(EventKind::StartDocument, None, AttributeSet::new(), 0, 0);
        loop {
            let offset = self.reader.buffer_position() as usize;
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => return Err(self.malformed(err, offset)),
            };
            match event {
                Event::Start(e) => self.start_tag(&e, offset)?,
                Event::Empty(e) => {
                    self.start_tag(&e, offset)?;
                    self.end_tag(offset)?;
                }
                Event::End(_) => self.end_tag(offset)?,
                Event::Text(t) => {
                    if !t.iter().all(u8::is_ascii_whitespace) {
                        self.push_text(offset);
                    }
                }
                Event::CData(_) => self.push_text(offset),
                Event::Eof => break,
                // declarations, comments, processing instructions, doctype
                _ => {}
            }
        }
        if let Some(open) = self.scopes.last() {
            let msg = format!("unexpected end of document inside <{}>", open.tag);
            return Err(self.malformed(msg, self.src.len()));
        }
        self.push(EventKind::EndDocument, None, AttributeSet::new(), 0, self.src.len());
        Ok(self.tokens)
    }

    fn start_tag(&mut self, e: &BytesStart<'_>, offset: usize) -> Result<(), ResourceError> {
        let tag = std::str::from_utf8(e.local_name().as_ref())
            .map_err(|err| self.malformed(err, offset))?
            .to_string();
        if self.scopes.is_empty() {
            if self.root_seen {
                let msg = format!("<{tag}> after the root element");
                return Err(self.malformed(msg, offset));
            }
            self.root_seen = true;
        }

        let mut namespaces = Vec::new();
        let mut raw = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.malformed(err, offset))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|err| self.malformed(err, offset))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|err| self.malformed(err, offset))?
                .into_owned();
            if key == "xmlns" {
                namespaces.push((String::new(), value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                namespaces.push((prefix.to_string(), value));
            } else {
                raw.push((key, value));
            }
        }
        // Declarations on this tag apply to its own attributes.
        self.scopes.push(Scope { tag: tag.clone(), namespaces });

        let mut attributes = AttributeSet::new();
        for (key, value) in raw {
            let (namespace, name) = match key.split_once(':') {
                Some((prefix, local)) => {
                    let uri = self.resolve_prefix(prefix).ok_or_else(|| {
                        self.malformed(format!("unbound namespace prefix {prefix:?}"), offset)
                    })?;
                    (Some(uri.to_string()), local.to_string())
                }
                None => (None, key.clone()),
            };
            attributes.push(Attribute { namespace, name, value });
        }

        let depth = self.scopes.len();
        self.push(EventKind::StartTag, Some(tag), attributes, depth, offset);
        Ok(())
    }

    fn end_tag(&mut self, offset: usize) -> Result<(), ResourceError> {
        let depth = self.scopes.len();
        let Some(scope) = self.scopes.pop() else {
            return Err(self.malformed("end tag without a matching start tag", offset));
        };
        self.push(EventKind::EndTag, Some(scope.tag), AttributeSet::new(), depth, offset);
        Ok(())
    }

    fn push_text(&mut self, offset: usize) {
        let depth = self.scopes.len();
        self.push(EventKind::Text, None, AttributeSet::new(), depth, offset);
    }

    fn push(
        &mut self,
        kind: EventKind,
        name: Option<String>,
        attributes: AttributeSet,
        depth: usize,
        offset: usize,
    ) {
        let (line, col) = self.line_col(offset);
        self.tokens.push(Token { kind, name, depth, attributes, line, col });
    }

    fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NS);
        }
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.namespaces.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.src.len());
        let before = &self.src.as_bytes()[..offset];
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
        let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        // columns count characters, not bytes
        let col = 1 + self
            .src
            .get(line_start..offset)
            .map_or(offset - line_start, |s| s.chars().count());
        (line, col)
    }

    fn malformed(&self, err: impl fmt::Display, offset: usize) -> ResourceError {
        let (line, col) = self.line_col(offset);
        ResourceError::MalformedXml { message: err.to_string(), line, col }
    }
}
