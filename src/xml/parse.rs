//! XML bytes to an owned tree, using quick-xml's pull parser.
//!
//! The reader honours a byte-order mark or the `encoding` named in the XML
//! declaration, so 8-bit documents (such as Latin-1 DocBook) decode to the
//! right characters.

use super::{Document, Element, Node};
use crate::error::{Error, Result};
use quick_xml::encoding::Decoder;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// Parse XML bytes into a [`Document`].
///
/// # Errors
///
/// Returns `Error::MalformedMarkup` for syntax errors, mismatched or unclosed
/// elements, multiple root elements, or a document without a root.
pub fn parse(bytes: &[u8]) -> Result<Document> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| malformed(reader.buffer_position(), &e))?;
        let decoder = reader.decoder();

        match event {
            Event::Start(start) => open.push(element_from(&start, decoder)?),
            Event::Empty(start) => {
                let element = element_from(&start, decoder)?;
                attach(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| Error::MalformedMarkup("closing tag without an open element".to_string()))?;
                attach(&mut open, &mut root, element)?;
            }
            Event::Text(text) => {
                // Whitespace around the root element is not part of the tree
                if let Some(parent) = open.last_mut() {
                    let raw = decode(decoder, &text);
                    push_text(parent, unescape_lenient(&raw).into_owned());
                }
            }
            Event::CData(data) => {
                if let Some(parent) = open.last_mut() {
                    push_text(parent, decode(decoder, &data).into_owned());
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.last() {
        return Err(Error::MalformedMarkup(format!(
            "unexpected end of input inside <{}>",
            unclosed.name
        )));
    }

    root.map(|root| Document { root })
        .ok_or_else(|| Error::MalformedMarkup("document has no root element".to_string()))
}

fn malformed(position: usize, err: &quick_xml::Error) -> Error {
    Error::MalformedMarkup(format!("at byte {position}: {err}"))
}

fn element_from(start: &BytesStart, decoder: Decoder) -> Result<Element> {
    let mut element = Element::new(decode(decoder, start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::MalformedMarkup(format!("bad attribute on <{}>: {e}", element.name)))?;
        let key = decode(decoder, attr.key.as_ref()).into_owned();
        let value = unescape_lenient(&decode(decoder, &attr.value)).into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Decode with the document encoding; bytes it cannot map become U+FFFD.
fn decode(decoder: Decoder, bytes: &[u8]) -> Cow<'_, str> {
    decoder
        .decode(bytes)
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes))
}

/// Resolve character references and the predefined entities. Any other
/// reference (`&nbsp;` from a DTD, a stray `&`) is kept as written.
fn unescape_lenient(raw: &str) -> Cow<'_, str> {
    if let Ok(text) = unescape(raw) {
        return text;
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let resolved = after
            .find(';')
            .and_then(|end| resolve_entity(&after[..end]).map(|ch| (ch, end)));
        match resolved {
            Some((ch, end)) => {
                out.push(ch);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Hang a finished element on its parent, or make it the root.
fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::MalformedMarkup(format!(
            "second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

/// Append text, merging with a preceding text node.
fn push_text(parent: &mut Element, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(previous)) = parent.children.last_mut() {
        previous.push_str(&text);
    } else {
        parent.children.push(Node::Text(text));
    }
}
