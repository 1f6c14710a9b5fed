//! Load pre-rendered HTML pages into a [`MemoryDocument`].
//!
//! The tokenizer is quick-xml with every well-formedness check switched off,
//! plus a little HTML awareness on top:
//!
//! - void elements (`br`, `img`, `meta`, ...) never take children
//! - end tags close the nearest open element with the same name; stray ones
//!   are dropped
//! - text, comments, entity references and attribute values are kept
//!   byte-for-byte
//!
//! The same loader fills elements through [`Dom::set_inner_html`](super::Dom::set_inner_html).
//!
//! Raw-text elements (`<script>`, `<style>`) are tokenized like any other
//! content, so markup-like text inside them may split into elements.

use compact_str::CompactString;
use quick_xml::{
    Reader,
    escape::unescape,
    events::{BytesStart, Event},
};

use super::memory::{Closing, Element, MemoryDocument, NodeId, ROOT};
use crate::error::{LightboxError, Result};

/// Elements that cannot have content in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[inline]
fn create_html_reader(content: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(content);
    let config = reader.config_mut();
    config.trim_text(false);
    config.enable_all_checks(false);
    config.allow_unmatched_ends = true;
    reader
}

#[inline]
fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

impl MemoryDocument {
    /// Parse a rendered page.
    ///
    /// A `<body>` is appended to the document when the page has none.
    pub fn parse(html: &str) -> Result<Self> {
        let mut doc = Self::empty();
        doc.parse_into(ROOT, html)?;
        doc.ensure_body();
        Ok(doc)
    }

    /// Parse a fragment and append its nodes to `root`. End tags never close
    /// anything above `root`.
    pub(crate) fn parse_into(&mut self, root: NodeId, html: &str) -> Result<()> {
        let mut reader = create_html_reader(html);
        let mut stack: Vec<(NodeId, CompactString)> = Vec::new();

        loop {
            let parent = stack.last().map_or(root, |(id, _)| *id);
            match reader.read_event() {
                Ok(Event::Start(elem)) => {
                    let element = element_from(&elem, Closing::Normal);
                    if is_void(&element.tag) {
                        let element = Element {
                            closing: Closing::Void,
                            ..element
                        };
                        self.push_element(parent, element);
                    } else {
                        let tag = element.tag.clone();
                        let id = self.push_element(parent, element);
                        stack.push((id, tag));
                    }
                }
                Ok(Event::Empty(elem)) => {
                    self.push_element(parent, element_from(&elem, Closing::SelfClosing));
                }
                Ok(Event::End(elem)) => {
                    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
                    if let Some(pos) = stack
                        .iter()
                        .rposition(|(_, tag)| tag.eq_ignore_ascii_case(&name))
                    {
                        stack.truncate(pos);
                    }
                }
                Ok(Event::Text(text)) => {
                    self.push_raw(parent, String::from_utf8_lossy(&text).into_owned());
                }
                Ok(Event::GeneralRef(entity)) => {
                    self.push_raw(parent, format!("&{};", String::from_utf8_lossy(&entity)));
                }
                Ok(Event::CData(data)) => {
                    self.push_raw(
                        parent,
                        format!("<![CDATA[{}]]>", String::from_utf8_lossy(&data)),
                    );
                }
                Ok(Event::Comment(comment)) => {
                    self.push_raw(parent, format!("<!--{}-->", String::from_utf8_lossy(&comment)));
                }
                Ok(Event::DocType(doctype)) => {
                    self.push_raw(
                        parent,
                        format!("<!DOCTYPE {}>", String::from_utf8_lossy(doctype.as_ref())),
                    );
                }
                Ok(Event::Decl(decl)) => {
                    self.push_raw(parent, format!("<?{}?>", String::from_utf8_lossy(decl.as_ref())));
                }
                Ok(Event::PI(pi)) => {
                    self.push_raw(parent, format!("<?{}?>", String::from_utf8_lossy(pi.as_ref())));
                }
                Ok(Event::Eof) => break,
                Err(err) => {
                    return Err(LightboxError::Markup {
                        position: reader.error_position() as u64,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Build an element from a start tag. Attribute values keep their source
/// text for output; the decoded value is what lookups see.
fn element_from(elem: &BytesStart<'_>, closing: Closing) -> Element {
    let tag = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let mut element = Element::new(&tag, closing);
    for attr in elem.html_attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let source = String::from_utf8_lossy(&attr.value).into_owned();
        // HTML-only entities such as `&nbsp;` stay undecoded.
        let value = unescape(&source).map_or_else(|_| source.clone(), |v| v.into_owned());
        // Single-quoted values may hold `"`.
        let source = source.replace('"', "&quot;");
        element.set_source_attribute(&key, value, source);
    }
    element
}
