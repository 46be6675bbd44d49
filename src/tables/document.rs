//! A small, forgiving HTML tree builder.
//!
//! Only what the rendered grammar tables need is supported: elements, attributes, text and
//! character references. The result is a plain element/text tree with no links back to parents.

use super::{error::ErrorKind, Result};

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];
const TABLE_SECTIONS: [&str; 3] = ["thead", "tbody", "tfoot"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map_or(false, |c| c.split_whitespace().any(|c| c == class))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// All elements below this one, depth-first in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.child_elements().collect::<Vec<_>>().into_iter().rev().collect(),
        }
    }

    pub fn find<P: Fn(&Element) -> bool>(&self, predicate: P) -> Option<&Element> {
        self.descendants().find(|e| predicate(*e))
    }

    /// Text content with runs of whitespace collapsed to one space, trimmed.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        self.push_text(&mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn push_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.push_text(out),
            }
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.stack.pop()?;
        let len = self.stack.len();
        self.stack.extend(e.child_elements());
        self.stack[len..].reverse();
        Some(e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn parse(src: &str) -> Result<Self> {
        let mut p = Parser {
            src,
            pos: 0,
            stack: vec![Element::new("#document")],
        };
        p.run()?;
        while p.stack.len() > 1 {
            p.close_top();
        }
        Ok(Document {
            root: p.stack.remove(0),
        })
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    stack: Vec<Element>,
}

impl<'a> Parser<'a> {
    fn run(&mut self) -> Result<()> {
        let src = self.src;
        while self.pos < src.len() {
            let rest = &src[self.pos..];
            if rest.starts_with("<!--") {
                let end = self.find_from(self.pos + 4, "-->", "unterminated comment")?;
                self.pos = end + 3;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                let end = self.find_from(self.pos + 2, ">", "unterminated declaration")?;
                self.pos = end + 1;
            } else if rest.starts_with("</") {
                self.end_tag()?;
            } else if rest.starts_with('<')
                && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.start_tag()?;
            } else {
                let end = rest
                    .char_indices()
                    .skip(1)
                    .find(|&(_, c)| c == '<')
                    .map_or(src.len(), |(i, _)| self.pos + i);
                let text = decode_entities(&src[self.pos..end]);
                self.top().children.push(Node::Text(text));
                self.pos = end;
            }
        }
        Ok(())
    }

    fn top(&mut self) -> &mut Element {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn error(&self, at: usize, message: &str) -> super::TranscribeError {
        ErrorKind::Document {
            line: self.src[..at].matches('\n').count() + 1,
            message: message.to_string(),
        }
        .into()
    }

    fn find_from(&self, from: usize, needle: &str, message: &str) -> Result<usize> {
        self.src[from..]
            .find(needle)
            .map(|i| from + i)
            .ok_or_else(|| self.error(self.pos, message))
    }

    fn close_top(&mut self) {
        if self.stack.len() > 1 {
            if let Some(e) = self.stack.pop() {
                self.top().children.push(Node::Element(e));
            }
        }
    }

    /// Closes the innermost open element named in `targets`, unless a `boundary` element is
    /// open inside it.
    fn close_implied(&mut self, targets: &[&str], boundaries: &[&str]) {
        for i in (1..self.stack.len()).rev() {
            let tag = self.stack[i].tag.as_str();
            if targets.contains(&tag) {
                while self.stack.len() > i {
                    self.close_top();
                }
                return;
            }
            if boundaries.contains(&tag) {
                return;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, f: F) -> &'a str {
        let src = self.src;
        let start = self.pos;
        let rest = &src[start..];
        let len = rest.find(|c: char| !f(c)).unwrap_or(rest.len());
        self.pos += len;
        &src[start..start + len]
    }

    fn start_tag(&mut self) -> Result<()> {
        let tag_start = self.pos;
        self.pos += 1;
        let tag = self
            .take_while(|c| c.is_ascii_alphanumeric() || c == '-' || c == ':')
            .to_ascii_lowercase();
        let mut element = Element::new(&tag);
        let mut self_closing = false;

        let src = self.src;
        loop {
            self.skip_whitespace();
            let rest = &src[self.pos..];
            if rest.is_empty() {
                return Err(self.error(tag_start, &format!("unterminated tag <{}>", tag)));
            } else if rest.starts_with("/>") {
                self.pos += 2;
                self_closing = true;
                break;
            } else if rest.starts_with('>') {
                self.pos += 1;
                break;
            }

            let name = self
                .take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
                .to_ascii_lowercase();
            if name.is_empty() {
                // a lone '/' or '=' inside the tag
                self.pos += 1;
                continue;
            }
            self.skip_whitespace();
            let value = if src[self.pos..].starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.attribute_value(tag_start, &tag)?
            } else {
                String::new()
            };
            element.attributes.push((name, value));
        }

        match tag.as_str() {
            "td" | "th" => self.close_implied(&["td", "th"], &["tr", "table"]),
            "tr" => {
                self.close_implied(&["td", "th"], &["tr", "table"]);
                self.close_implied(&["tr"], &["table", "thead", "tbody", "tfoot"]);
            }
            "thead" | "tbody" | "tfoot" => {
                self.close_implied(&["td", "th"], &["tr", "table"]);
                self.close_implied(&["tr"], &["table", "thead", "tbody", "tfoot"]);
                self.close_implied(&TABLE_SECTIONS, &["table"]);
            }
            _ => {}
        }

        if self_closing || VOID_ELEMENTS.contains(&tag.as_str()) {
            self.top().children.push(Node::Element(element));
        } else if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
            let closing = format!("</{}", tag);
            let lower = src[self.pos..].to_ascii_lowercase();
            let end = lower
                .find(&closing)
                .map(|i| self.pos + i)
                .ok_or_else(|| self.error(tag_start, &format!("unterminated <{}>", tag)))?;
            element
                .children
                .push(Node::Text(src[self.pos..end].to_string()));
            self.pos = self.find_from(end, ">", "unterminated end tag")? + 1;
            self.top().children.push(Node::Element(element));
        } else {
            self.stack.push(element);
        }
        Ok(())
    }

    fn attribute_value(&mut self, tag_start: usize, tag: &str) -> Result<String> {
        let src = self.src;
        let rest = &src[self.pos..];
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let end = rest[1..].find(quote).ok_or_else(|| {
                    self.error(tag_start, &format!("unterminated attribute in <{}>", tag))
                })?;
                let value = decode_entities(&rest[1..1 + end]);
                self.pos += end + 2;
                Ok(value)
            }
            _ => {
                let raw = self.take_while(|c| !c.is_whitespace() && c != '>');
                Ok(decode_entities(raw))
            }
        }
    }

    fn end_tag(&mut self) -> Result<()> {
        let end = self.find_from(self.pos + 2, ">", "unterminated end tag")?;
        let tag = self.src[self.pos + 2..end].trim().to_ascii_lowercase();
        self.pos = end + 1;

        if let Some(i) = (1..self.stack.len()).rev().find(|&i| self.stack[i].tag == tag) {
            while self.stack.len() > i {
                self.close_top();
            }
        }
        Ok(())
    }
}

pub fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 12)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "epsilon" => Some('ε'),
        "rarr" => Some('→'),
        _ => None,
    }
}
