// xml.rs — minimal XML helper: pull tokenizer, element tree, escaping.
//
// Namespace-unaware (`:` is just part of a name), no DTD, no processing
// instructions beyond skipping the `<?xml …?>` declaration. Enough for the
// config/data documents the toolkit deals with, nothing more.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("unterminated tag at byte {offset}")]
    UnterminatedTag { offset: usize },
    #[error("unterminated entity at byte {offset}")]
    UnterminatedEntity { offset: usize },
    #[error("unknown entity `&{name};` at byte {offset}")]
    UnknownEntity { name: String, offset: usize },
    #[error("mismatched close tag `</{got}>` at byte {offset}, expected `</{expected}>`")]
    MismatchedCloseTag { got: String, expected: String, offset: usize },
    #[error("close tag `</{name}>` with no open element at byte {offset}")]
    UnexpectedCloseTag { name: String, offset: usize },
    #[error("content after the document element at byte {offset}")]
    TrailingContent { offset: usize },
    #[error("document has no element")]
    Empty,
    #[error("malformed tag at byte {offset}: {reason}")]
    MalformedTag { offset: usize, reason: &'static str },
}

/// One tokenizer event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartTag { name: String, attrs: Vec<(String, String)>, self_closing: bool },
    EndTag { name: String },
    Text(String),
    Comment(String),
    Declaration(String),
}

/// A parsed element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    /// First child element with the given name. The returned borrow is tied
    /// to `self` only, not to `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|n| match n {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// All child elements with the given name.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter_map(move |n| match n {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// All descendant text, concatenated in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }
}

/// Escape text content: `&`, `<`, `>`.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape an attribute value: text escapes plus both quote kinds.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&apos;")
}

fn decode_entities(s: &str, base_offset: usize) -> Result<String, XmlError> {
    let mut out = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'&' {
            // Advance by whole chars, not bytes.
            let ch = s[i..].chars().next().unwrap_or('\u{FFFD}');
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }
        let end = s[i..]
            .find(';')
            .ok_or(XmlError::UnterminatedEntity { offset: base_offset + i })?;
        let name = &s[i + 1..i + end];
        match name {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ if name.starts_with("#x") || name.starts_with("#X") => {
                let code = u32::from_str_radix(&name[2..], 16).ok();
                match code.and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => {
                        return Err(XmlError::UnknownEntity {
                            name: name.to_string(),
                            offset: base_offset + i,
                        })
                    }
                }
            }
            _ if name.starts_with('#') => {
                let code = name[1..].parse::<u32>().ok();
                match code.and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => {
                        return Err(XmlError::UnknownEntity {
                            name: name.to_string(),
                            offset: base_offset + i,
                        })
                    }
                }
            }
            _ => {
                return Err(XmlError::UnknownEntity {
                    name: name.to_string(),
                    offset: base_offset + i,
                })
            }
        }
        i += end + 1;
    }
    Ok(out)
}

/// Pull tokenizer over a complete document string.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next unread input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Next event, or `None` at end of input.
    pub fn next_event(&mut self) -> Result<Option<Event>, XmlError> {
        if self.pos >= self.input.len() {
            return Ok(None);
        }
        let rest = &self.input[self.pos..];
        if let Some(stripped) = rest.strip_prefix("<!--") {
            let end = stripped
                .find("-->")
                .ok_or(XmlError::UnterminatedTag { offset: self.pos })?;
            let comment = stripped[..end].to_string();
            self.pos += 4 + end + 3;
            return Ok(Some(Event::Comment(comment)));
        }
        if let Some(stripped) = rest.strip_prefix("<?") {
            let end = stripped
                .find("?>")
                .ok_or(XmlError::UnterminatedTag { offset: self.pos })?;
            let decl = stripped[..end].to_string();
            self.pos += 2 + end + 2;
            return Ok(Some(Event::Declaration(decl)));
        }
        if rest.starts_with('<') {
            return self.read_tag();
        }
        // Text run up to the next `<`.
        let end = rest.find('<').unwrap_or(rest.len());
        let raw = &rest[..end];
        let offset = self.pos;
        self.pos += end;
        let decoded = decode_entities(raw, offset)?;
        Ok(Some(Event::Text(decoded)))
    }

    fn read_tag(&mut self) -> Result<Option<Event>, XmlError> {
        let start = self.pos;
        let rest = &self.input[self.pos..];
        let end = tag_end(rest).ok_or(XmlError::UnterminatedTag { offset: start })?;
        let inner = &rest[1..end];
        self.pos += end + 1;

        if let Some(name) = inner.strip_prefix('/') {
            let name = name.trim();
            if name.is_empty() {
                return Err(XmlError::MalformedTag { offset: start, reason: "empty close tag" });
            }
            return Ok(Some(Event::EndTag { name: name.to_string() }));
        }

        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(trimmed) => (trimmed, true),
            None => (inner, false),
        };
        let inner = inner.trim();
        if inner.is_empty() {
            return Err(XmlError::MalformedTag { offset: start, reason: "empty tag" });
        }

        let name_end = inner
            .find(|c: char| c.is_whitespace())
            .unwrap_or(inner.len());
        let name = inner[..name_end].to_string();
        let attrs = parse_attrs(&inner[name_end..], start)?;
        Ok(Some(Event::StartTag { name, attrs, self_closing }))
    }
}

/// Byte offset of the `>` closing a tag, skipping any `>` inside a quoted
/// attribute value (`<a title="x>y">`).
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in rest.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

fn parse_attrs(s: &str, tag_offset: usize) -> Result<Vec<(String, String)>, XmlError> {
    let mut attrs = Vec::new();
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        let eq = rest.find('=').ok_or(XmlError::MalformedTag {
            offset: tag_offset,
            reason: "attribute without value",
        })?;
        let name = rest[..eq].trim().to_string();
        if name.is_empty() {
            return Err(XmlError::MalformedTag { offset: tag_offset, reason: "empty attribute name" });
        }
        let after = rest[eq + 1..].trim_start();
        let quote = after.chars().next().ok_or(XmlError::MalformedTag {
            offset: tag_offset,
            reason: "attribute without value",
        })?;
        if quote != '"' && quote != '\'' {
            return Err(XmlError::MalformedTag { offset: tag_offset, reason: "unquoted attribute value" });
        }
        let close = after[1..].find(quote).ok_or(XmlError::MalformedTag {
            offset: tag_offset,
            reason: "unterminated attribute value",
        })?;
        let raw = &after[1..1 + close];
        attrs.push((name, decode_entities(raw, tag_offset)?));
        rest = after[1 + close + 1..].trim_start();
    }
    Ok(attrs)
}

/// Parse a whole document into its root element.
///
/// Whitespace-only text outside the root is ignored; anything else after the
/// document element is an error.
pub fn parse(input: &str) -> Result<Element, XmlError> {
    let mut tok = Tokenizer::new(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    while let Some(event) = tok.next_event()? {
        let offset = tok.offset();
        match event {
            Event::Declaration(_) | Event::Comment(_) => {}
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    top.children.push(Node::Text(t));
                } else if !t.trim().is_empty() {
                    return Err(XmlError::TrailingContent { offset });
                }
            }
            Event::StartTag { name, attrs, self_closing } => {
                if root.is_some() && stack.is_empty() {
                    return Err(XmlError::TrailingContent { offset });
                }
                let element = Element {
                    name,
                    attrs: attrs.into_iter().collect(),
                    children: Vec::new(),
                };
                if self_closing {
                    attach(&mut stack, &mut root, element);
                } else {
                    stack.push(element);
                }
            }
            Event::EndTag { name } => {
                let element = stack.pop().ok_or_else(|| XmlError::UnexpectedCloseTag {
                    name: name.clone(),
                    offset,
                })?;
                if element.name != name {
                    return Err(XmlError::MismatchedCloseTag {
                        got: name,
                        expected: element.name,
                        offset,
                    });
                }
                attach(&mut stack, &mut root, element);
            }
        }
    }
    if let Some(open) = stack.pop() {
        return Err(XmlError::MismatchedCloseTag {
            got: String::new(),
            expected: open.name,
            offset: input.len(),
        });
    }
    root.ok_or(XmlError::Empty)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
