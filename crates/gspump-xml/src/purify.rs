//! Removal of Atom link wrappers
//!
//! The document is scanned once with a namespace-aware reader to find the
//! byte span of every element that directly contains an Atom `link`. Those
//! spans are then cut out of the original text, which leaves every retained
//! byte (declaration, comments, indentation, attribute quoting) untouched.

use std::ops::Range;

use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};

use crate::{Error, Result};

/// Namespace URI of Atom syndication elements.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// An element that has been opened but not yet closed.
struct OpenElement {
    start: usize,
    wraps_link: bool,
}

/// Strip every element that wraps an Atom link.
///
/// The root element is never removed, even if it holds a link directly.
/// Whitespace-only text following a removed element is removed with it.
pub fn purify(xml: &str) -> Result<String> {
    let spans = link_wrappers(xml)?;
    if spans.is_empty() {
        return Ok(xml.to_string());
    }

    let mut output = String::with_capacity(xml.len());
    let mut cursor = 0;
    for span in &spans {
        output.push_str(&xml[cursor..span.start]);
        cursor = span.end;
    }
    output.push_str(&xml[cursor..]);

    tracing::debug!(removed = spans.len(), "Removed Atom link wrappers");
    Ok(output)
}

/// Byte oriented variant of [`purify`]; input must be UTF-8.
pub fn purify_bytes(xml: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(xml)?;
    purify(text).map(String::into_bytes)
}

/// Byte ranges to cut, sorted and non-overlapping.
///
/// Also validates the document: mismatched or unclosed tags, unbound
/// prefixes, stray content outside the root and a missing root are errors.
pub fn link_wrappers(xml: &str) -> Result<Vec<Range<usize>>> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut spans: Vec<Range<usize>> = Vec::new();
    let mut seen_root = false;

    loop {
        let position = reader.buffer_position() as usize;
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| Error::parse(position, e.to_string()))?;

        let is_link = match &event {
            Event::Start(element) | Event::Empty(element) => {
                is_atom_link(&ns, element.local_name().as_ref(), position)?
            }
            _ => false,
        };
        let end = reader.buffer_position() as usize;

        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                if stack.is_empty() {
                    if seen_root {
                        return Err(Error::parse(position, "more than one root element"));
                    }
                    seen_root = true;
                }
                if is_link {
                    if let Some(parent) = stack.last_mut() {
                        parent.wraps_link = true;
                    }
                }
                if matches!(event, Event::Start(_)) {
                    // `<` + tag content + `>`
                    stack.push(OpenElement {
                        start: end - element.len() - 2,
                        wraps_link: false,
                    });
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| Error::parse(position, "closing tag without opening tag"))?;
                if element.wraps_link && !stack.is_empty() {
                    spans.push(element.start..end + trailing_whitespace(&xml[end..]));
                }
            }
            Event::Text(text) if stack.is_empty() => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(Error::parse(position, "content outside the root element"));
                }
            }
            Event::CData(_) if stack.is_empty() => {
                return Err(Error::parse(position, "content outside the root element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::parse(open.start, "element is never closed"));
    }
    if !seen_root {
        return Err(Error::parse(0, "no root element"));
    }

    Ok(outermost(spans))
}

fn is_atom_link(ns: &ResolveResult<'_>, local_name: &[u8], position: usize) -> Result<bool> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => {
            Ok(*uri == ATOM_NAMESPACE.as_bytes() && local_name == b"link")
        }
        ResolveResult::Unbound => Ok(false),
        ResolveResult::Unknown(prefix) => Err(Error::UnboundPrefix {
            prefix: String::from_utf8_lossy(prefix).into_owned(),
            position,
        }),
    }
}

/// Length of the whitespace-only text at the start of `rest`, or 0 if the
/// text before the next tag carries anything else.
fn trailing_whitespace(rest: &str) -> usize {
    let text_len = rest.find('<').unwrap_or(rest.len());
    if rest[..text_len].trim().is_empty() {
        text_len
    } else {
        0
    }
}

/// Drop spans nested inside an earlier span.
fn outermost(mut spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    spans.sort_by_key(|span| span.start);
    let mut kept: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match kept.last() {
            Some(last) if span.start < last.end => {}
            _ => kept.push(span),
        }
    }
    kept
}
