//! HTML template fragments.
//!
//! Widgets are declared with a small HTML template such as
//! `<div class="panel"><span>title</span></div>`. This module turns such a
//! template into a [`TemplateNode`] tree, which [`DomTree`](crate::DomTree)
//! then allocates as detached nodes.
//!
//! Only the subset needed for widget templates is understood: elements,
//! quoted, unquoted and boolean attributes, void and self-closing tags, text,
//! comments and the five predefined character references.

use crate::DomError;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A parsed template node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    /// An element with its attributes in source order.
    Element {
        /// Lowercased tag name.
        tag: String,
        /// Attribute name/value pairs; boolean attributes have an empty value.
        attrs: Vec<(String, String)>,
        /// Child nodes.
        children: Vec<TemplateNode>,
    },
    /// A run of character data.
    Text(String),
}

/// Parse a template that must contain exactly one root element.
///
/// Leading and trailing whitespace around the root is ignored.
///
/// # Errors
///
/// Returns [`DomError::MalformedTemplate`] for unterminated tags, mismatched
/// end tags, or anything other than a single root element.
pub fn parse_template(source: &str) -> Result<TemplateNode, DomError> {
    let mut parser = TemplateParser {
        src: source.as_bytes(),
        text: source,
        pos: 0,
    };
    let mut roots = parser.parse_children(None)?;
    roots.retain(|node| !matches!(node, TemplateNode::Text(t) if t.trim().is_empty()));
    match roots.len() {
        1 if matches!(roots[0], TemplateNode::Element { .. }) => Ok(roots.remove(0)),
        _ => Err(DomError::MalformedTemplate {
            offset: 0,
            reason: "template must contain exactly one root element".to_string(),
        }),
    }
}

struct TemplateParser<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl TemplateParser<'_> {
    fn error(&self, reason: &str) -> DomError {
        DomError::MalformedTemplate {
            offset: self.pos,
            reason: reason.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.src[self.pos..].starts_with(prefix.as_bytes())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Parse nodes until the end tag of `open` (or end of input at top level).
    fn parse_children(&mut self, open: Option<&str>) -> Result<Vec<TemplateNode>, DomError> {
        let mut nodes = Vec::new();
        loop {
            if self.pos >= self.src.len() {
                return match open {
                    None => Ok(nodes),
                    Some(tag) => Err(self.error(&format!("unclosed <{tag}>"))),
                };
            }
            if self.starts_with("<!--") {
                let end = self.text[self.pos + 4..]
                    .find("-->")
                    .ok_or_else(|| self.error("unterminated comment"))?;
                self.pos += 4 + end + 3;
            } else if self.starts_with("</") {
                self.pos += 2;
                let name = self.read_name();
                self.skip_whitespace();
                if self.peek() != Some(b'>') {
                    return Err(self.error("expected '>' after end tag name"));
                }
                self.pos += 1;
                return match open {
                    Some(tag) if tag == name => Ok(nodes),
                    _ => Err(self.error(&format!("unexpected </{name}>"))),
                };
            } else if self.peek() == Some(b'<') {
                nodes.push(self.parse_element()?);
            } else {
                let start = self.pos;
                while self.peek().is_some_and(|b| b != b'<') {
                    self.pos += 1;
                }
                nodes.push(TemplateNode::Text(decode_entities(
                    &self.text[start..self.pos],
                )));
            }
        }
    }

    fn parse_element(&mut self) -> Result<TemplateNode, DomError> {
        self.pos += 1;
        let tag = self.read_name();
        if tag.is_empty() {
            return Err(self.error("expected tag name"));
        }
        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.error(&format!("unterminated <{tag}"))),
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') if self.starts_with("/>") => {
                    self.pos += 2;
                    return Ok(TemplateNode::Element {
                        tag,
                        attrs,
                        children: Vec::new(),
                    });
                }
                Some(_) => attrs.push(self.parse_attribute()?),
            }
        }
        if VOID_ELEMENTS.contains(&tag.as_str()) {
            return Ok(TemplateNode::Element {
                tag,
                attrs,
                children: Vec::new(),
            });
        }
        let children = self.parse_children(Some(&tag))?;
        Ok(TemplateNode::Element {
            tag,
            attrs,
            children,
        })
    }

    fn parse_attribute(&mut self) -> Result<(String, String), DomError> {
        let name = self.read_name();
        if name.is_empty() {
            return Err(self.error("expected attribute name"));
        }
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Ok((name, String::new()));
        }
        self.pos += 1;
        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|b| b != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(self.error("unterminated attribute value"));
                }
                let raw = &self.text[start..self.pos];
                self.pos += 1;
                raw
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|b| !b.is_ascii_whitespace() && b != b'>')
                {
                    self.pos += 1;
                }
                &self.text[start..self.pos]
            }
        };
        Ok((name, decode_entities(value)))
    }

    fn read_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'>' | b'/' | b'=' | b'<'))
        {
            self.pos += 1;
        }
        self.text[start..self.pos].to_ascii_lowercase()
    }
}

/// [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
///
/// Only the XML predefined entities are decoded.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
