// src/core/html.rs
//
// Pull-based HTML tokenizer. Turns a document into a flat stream of
// Open/Close/Text events so page parsers can run as plain loops over an
// iterator instead of chasing offsets through the document.
//
// Deliberately not a general HTML parser: no DOM, no nesting checks, no
// script/style special-casing. Tag names and attribute names come out
// ASCII-lowercased; attribute values and text have entities decoded.

use crate::core::sanitize::normalize_entities;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `<name attr="value" ...>` — also emitted for self-closing tags.
    Open {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// `</name>`
    Close { name: String },
    /// Raw character data between tags, entities decoded, not trimmed.
    Text(String),
}

/// Look up an attribute by (lowercase) name.
pub fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

pub struct Tokenizer<'a> {
    doc: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(doc: &'a str) -> Self {
        Tokenizer { doc, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.doc[self.pos..]
    }

    /// Skip a `<!-- ... -->` comment or `<!DOCTYPE ...>` declaration.
    /// Returns false if the construct never terminates (truncated page).
    fn skip_declaration(&mut self) -> bool {
        let rest = self.rest();
        if rest.starts_with("<!--") {
            match rest.find("-->") {
                Some(end) => {
                    self.pos += end + 3;
                    true
                }
                None => false,
            }
        } else {
            match rest.find('>') {
                Some(end) => {
                    self.pos += end + 1;
                    true
                }
                None => false,
            }
        }
    }

    /// Parse the attribute list of an open tag. `tag` is the opener text
    /// between the tag name and the closing '>'.
    fn parse_attrs(tag: &str) -> Vec<(String, String)> {
        let mut attrs = Vec::new();
        let bytes = tag.as_bytes();
        let mut i = 0usize;

        while i < bytes.len() {
            // skip whitespace and stray '/'
            while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
                i += 1;
            }
            if i >= bytes.len() {
                break;
            }

            // attribute name
            let name_start = i;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && bytes[i] != b'='
                && bytes[i] != b'/'
            {
                i += 1;
            }
            let name = tag[name_start..i].to_ascii_lowercase();
            if name.is_empty() {
                break;
            }

            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            if i >= bytes.len() || bytes[i] != b'=' {
                // bare attribute (e.g. `nowrap`)
                attrs.push((name, s!()));
                continue;
            }
            i += 1; // past '='
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            // quoted or unquoted value
            let value = if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let v_start = i;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                let v = &tag[v_start..i];
                if i < bytes.len() {
                    i += 1; // past closing quote
                }
                v
            } else {
                // unquoted: runs to whitespace ('/' stays in; URLs have them)
                let v_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &tag[v_start..i]
            };

            attrs.push((name, normalize_entities(value)));
        }

        attrs
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return None;
            }

            // Text run up to the next tag
            if !rest.starts_with('<') {
                let end = rest.find('<').unwrap_or(rest.len());
                let text = &rest[..end];
                self.pos += end;
                return Some(Event::Text(normalize_entities(text)));
            }

            if rest.starts_with("<!") {
                if !self.skip_declaration() {
                    self.pos = self.doc.len();
                    return None;
                }
                continue;
            }

            // A tag. Find its '>'; a dangling '<' at EOF ends the stream.
            let gt = match rest.find('>') {
                Some(p) => p,
                None => {
                    self.pos = self.doc.len();
                    return None;
                }
            };
            let opener = &rest[1..gt];
            self.pos += gt + 1;

            if let Some(close_name) = opener.strip_prefix('/') {
                let name = close_name.trim().to_ascii_lowercase();
                if name.is_empty() {
                    continue;
                }
                return Some(Event::Close { name });
            }

            // tag name = leading run of alphanumerics
            let name_end = opener
                .bytes()
                .position(|b| !b.is_ascii_alphanumeric())
                .unwrap_or(opener.len());
            let name = opener[..name_end].to_ascii_lowercase();
            if name.is_empty() {
                // "< >" or similar garbage; drop it
                continue;
            }

            let attrs = Self::parse_attrs(&opener[name_end..]);
            return Some(Event::Open { name, attrs });
        }
    }
}
