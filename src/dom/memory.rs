//! Arena-backed in-memory document.
//!
//! Used for headless runs and for every controller test. Nodes live in a
//! single `Vec` and are addressed by [`NodeId`]. Nodes created with
//! [`Dom::create_element`] stay in the arena once detached. Children dropped by
//! [`Dom::set_inner_html`] or [`Dom::set_text`] are recycled, unless a
//! listener or the body sits in their subtree, so their ids may later name
//! new nodes.
//!
//! Listeners are recorded, not executed: [`MemoryDocument::click_events`] and
//! [`MemoryDocument::key_events`] return the events a browser would deliver,
//! in dispatch order, and the caller routes them.

use compact_str::CompactString;
use quick_xml::escape::escape;
use smallvec::SmallVec;

use super::{Dom, DomEvent, EventKind, Target};
use crate::error::Result;

/// Handle to a node in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// The synthetic document node every tree hangs from.
pub(crate) const ROOT: NodeId = NodeId(0);

/// How an element's end is written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Closing {
    /// `<tag>...</tag>`
    Normal,
    /// `<tag/>`
    SelfClosing,
    /// `<tag>` with no end tag (`br`, `img`, ...)
    Void,
}

/// Parsed declarations of a `style` attribute, in source order.
type Declarations = SmallVec<[(CompactString, String); 2]>;

#[derive(Debug, Clone)]
pub(crate) struct Attribute {
    pub name: CompactString,
    /// Decoded value.
    pub value: String,
    /// Escaped text as read from markup. Written back unchanged until the
    /// attribute is set again.
    pub source: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub tag: CompactString,
    /// Attributes in source order, `style` included.
    pub attributes: SmallVec<[Attribute; 4]>,
    pub style: Declarations,
    pub closing: Closing,
}

impl Element {
    pub fn new(tag: &str, closing: Closing) -> Self {
        Self {
            tag: CompactString::new(tag),
            attributes: SmallVec::new(),
            style: SmallVec::new(),
            closing,
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.put(name, value.to_owned(), None);
    }

    /// Attribute read from markup, `source` being the text between the quotes.
    pub fn set_source_attribute(&mut self, name: &str, value: String, source: String) {
        self.put(name, value, Some(source));
    }

    fn put(&mut self, name: &str, value: String, source: Option<String>) {
        if name.eq_ignore_ascii_case("style") {
            self.style = parse_style(&value);
        }
        match self.attributes.iter_mut().find(|attr| attr.name.as_str() == name) {
            Some(attr) => {
                attr.value = value;
                attr.source = source;
            }
            None => self.attributes.push(Attribute {
                name: CompactString::new(name),
                value,
                source,
            }),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.as_str() == name)
            .map(|attr| attr.value.as_str())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.style.retain(|(key, _)| key.as_str() != property);
        } else {
            match self.style.iter_mut().find(|(key, _)| key.as_str() == property) {
                Some((_, existing)) => *existing = value.to_owned(),
                None => self.style.push((CompactString::new(property), value.to_owned())),
            }
        }

        let is_style = |attr: &Attribute| attr.name.eq_ignore_ascii_case("style");
        if self.style.is_empty() {
            self.attributes.retain(|attr| !is_style(attr));
            return;
        }
        let text = self
            .style
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        match self.attributes.iter_mut().find(|attr| is_style(attr)) {
            Some(attr) => {
                attr.value = text;
                attr.source = None;
            }
            None => self.attributes.push(Attribute {
                name: CompactString::new("style"),
                value: text,
                source: None,
            }),
        }
    }
}

/// Split an inline `style` attribute into declarations.
///
/// A `;` inside parentheses or quotes is part of the value, as in
/// `url(data:image/png;base64,...)`.
fn parse_style(value: &str) -> Declarations {
    let mut declarations = Declarations::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                push_declaration(&mut declarations, &value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_declaration(&mut declarations, &value[start..]);
    declarations
}

fn push_declaration(declarations: &mut Declarations, declaration: &str) {
    let Some((key, value)) = declaration.split_once(':') else {
        return;
    };
    let (key, value) = (key.trim(), value.trim());
    if !key.is_empty() && !value.is_empty() {
        declarations.push((CompactString::new(key), value.to_owned()));
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(Element),
    /// Text, comments, entity references: written back verbatim.
    Raw(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory DOM implementing [`Dom`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    /// Recycled slots, reused by `alloc`.
    free: Vec<NodeId>,
    body: NodeId,
    listeners: Vec<(Target<NodeId>, EventKind)>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty document containing only `<body>`.
    pub fn new() -> Self {
        let mut doc = Self::empty();
        doc.ensure_body();
        doc
    }

    /// Document node only, no `<body>` yet.
    pub(crate) fn empty() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element(Element::new("#document", Closing::Normal)),
                parent: None,
                children: Vec::new(),
            }],
            free: Vec::new(),
            body: ROOT,
            listeners: Vec::new(),
        }
    }

    pub(crate) fn push_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.alloc(NodeKind::Element(element));
        self.attach(parent, id);
        id
    }

    pub(crate) fn push_raw(&mut self, parent: NodeId, raw: String) -> NodeId {
        let id = self.alloc(NodeKind::Raw(raw));
        self.attach(parent, id);
        id
    }

    /// Point `body` at the first `<body>` element, creating one if missing.
    pub(crate) fn ensure_body(&mut self) {
        if let Some(body) = self.find_first(ROOT, |element| element.tag == "body") {
            self.body = body;
            return;
        }
        let parent = self
            .find_first(ROOT, |element| element.tag == "html")
            .unwrap_or(ROOT);
        self.body = self.push_element(parent, Element::new("body", Closing::Normal));
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn body_id(&self) -> NodeId {
        self.body
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.tag.as_str())
    }

    /// Attribute value. Inline styles are read with [`Dom::style`].
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|element| element.has_class(class))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Child nodes that are elements (text and comments skipped).
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    /// Nodes held by the arena, attached or not. Recycled slots don't count.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        self.serialize_children(ROOT)
    }

    pub fn listeners(&self) -> &[(Target<NodeId>, EventKind)] {
        &self.listeners
    }

    pub fn listener_count(&self, target: &Target<NodeId>, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|(t, k)| t == target && *k == kind)
            .count()
    }

    // ========================================================================
    // Event Simulation
    // ========================================================================

    /// Events delivered by a click on `node`: every click listener on the
    /// node and its ancestors (innermost first), then document, then window.
    pub fn click_events(&self, node: NodeId) -> Vec<DomEvent<NodeId>> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }

        let mut events = Vec::new();
        for id in path {
            let target = Target::Node(id);
            for _ in 0..self.listener_count(&target, EventKind::Click) {
                events.push(DomEvent::click(target.clone(), Some(node)));
            }
        }
        for target in [Target::Document, Target::Window] {
            for _ in 0..self.listener_count(&target, EventKind::Click) {
                events.push(DomEvent::click(target.clone(), Some(node)));
            }
        }
        events
    }

    /// Events delivered by a key press with nothing focused.
    pub fn key_events(&self, key: &str) -> Vec<DomEvent<NodeId>> {
        let mut events = Vec::new();
        for target in [Target::Document, Target::Window] {
            for _ in 0..self.listener_count(&target, EventKind::KeyDown) {
                events.push(DomEvent::key_down(target.clone(), key));
            }
        }
        events
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        if let Some(id) = self.free.pop() {
            self.nodes[id.0] = node;
            return id;
        }
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Move `child` under `parent`, detaching it from its old parent first.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.parent(child) {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Replace the children of `id` with whatever `fill` appends, then
    /// release the old ones.
    fn replace_children(&mut self, id: NodeId, fill: impl FnOnce(&mut Self)) {
        let old = std::mem::take(&mut self.nodes[id.0].children);
        fill(self);
        for child in old {
            self.release(child);
        }
    }

    /// Detach `id` and recycle its subtree. A subtree holding the body or a
    /// listener target is only detached.
    fn release(&mut self, id: NodeId) {
        self.nodes[id.0].parent = None;
        let subtree = self.subtree(id);
        let pinned = |node: &NodeId| {
            *node == self.body
                || self
                    .listeners
                    .iter()
                    .any(|(target, _)| *target == Target::Node(*node))
        };
        if subtree.iter().any(pinned) {
            return;
        }
        for node in subtree {
            let slot = &mut self.nodes[node.0];
            slot.kind = NodeKind::Raw(String::new());
            slot.parent = None;
            slot.children.clear();
            self.free.push(node);
        }
    }

    /// `id` and every node below it, elements and raw nodes alike.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut nodes = vec![id];
        let mut i = 0;
        while let Some(&node) = nodes.get(i) {
            let children = self.children(node);
            nodes.extend_from_slice(children);
            i += 1;
        }
        nodes
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0).map(|node| &node.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0).map(|node| &mut node.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Depth-first search in document order, `from` excluded.
    fn find_first(&self, from: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut found = None;
        self.walk(from, &mut |id, element| {
            if found.is_none() && pred(element) {
                found = Some(id);
            }
        });
        found
    }

    fn walk(&self, id: NodeId, visit: &mut impl FnMut(NodeId, &Element)) {
        for &child in self.children(id) {
            if let Some(element) = self.element(child) {
                visit(child, element);
                self.walk(child, visit);
            }
        }
    }

    fn serialize_children(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.serialize_node(child, &mut out);
        }
        out
    }

    fn serialize_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        let element = match &node.kind {
            NodeKind::Raw(raw) => {
                out.push_str(raw);
                return;
            }
            NodeKind::Element(element) => element,
        };

        out.push('<');
        out.push_str(&element.tag);
        for attr in &element.attributes {
            match &attr.source {
                Some(source) => push_attribute(out, &attr.name, source),
                None => push_attribute(out, &attr.name, &escape(&attr.value)),
            }
        }

        match element.closing {
            Closing::Void => out.push('>'),
            Closing::SelfClosing if node.children.is_empty() => out.push_str("/>"),
            Closing::SelfClosing | Closing::Normal => {
                out.push('>');
                for &child in &node.children {
                    self.serialize_node(child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

/// `escaped` goes between double quotes as is.
fn push_attribute(out: &mut String, key: &str, escaped: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(escaped);
    out.push('"');
}

impl Dom for MemoryDocument {
    type Node = NodeId;

    fn query_class(&self, class: &str) -> Result<Vec<NodeId>> {
        let mut found = Vec::new();
        self.walk(ROOT, &mut |id, element| {
            if element.has_class(class) {
                found.push(id);
            }
        });
        Ok(found)
    }

    fn body(&self) -> Result<NodeId> {
        Ok(self.body)
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        Ok(self.alloc(NodeKind::Element(Element::new(tag, Closing::Normal))))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        if self.element(*parent).is_some() && child.0 < self.nodes.len() {
            self.attach(*parent, *child);
        }
        Ok(())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        if let Some(element) = self.element_mut(*node) {
            element.set_attribute(name, value);
        }
        Ok(())
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.element(*node).and_then(|element| {
            element
                .style
                .iter()
                .find(|(key, _)| key.as_str() == property)
                .map(|(_, value)| value.clone())
        })
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) -> Result<()> {
        if let Some(element) = self.element_mut(*node) {
            element.set_style(property, value);
        }
        Ok(())
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<()> {
        if self.element(*node).is_none() {
            return Ok(());
        }
        self.replace_children(*node, |doc| {
            if !text.is_empty() {
                doc.push_raw(*node, escape(text).into_owned());
            }
        });
        Ok(())
    }

    fn inner_html(&self, node: &NodeId) -> String {
        self.serialize_children(*node)
    }

    fn set_inner_html(&mut self, node: &NodeId, markup: &str) -> Result<()> {
        if self.element(*node).is_none() {
            return Ok(());
        }
        self.replace_children(*node, |doc| {
            if doc.parse_into(*node, markup).is_ok() {
                return;
            }
            // Browsers accept any markup here; keep what the tokenizer rejects
            // as one opaque node.
            let partial = std::mem::take(&mut doc.nodes[node.0].children);
            for child in partial {
                doc.release(child);
            }
            doc.push_raw(*node, markup.to_owned());
        });
        Ok(())
    }

    fn listen(&mut self, target: Target<NodeId>, kind: EventKind) -> Result<()> {
        self.listeners.push((target, kind));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_body() {
        let doc = MemoryDocument::new();
        let body = doc.body().unwrap();

        assert_eq!(doc.tag(body), Some("body"));
        assert_eq!(doc.parent(body), Some(doc.root()));
        assert_eq!(doc.to_html(), "<body></body>");
    }

    #[test]
    fn test_append_and_serialize() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(&div, "class", "a b").unwrap();
        doc.set_attribute(&div, "title", "say \"hi\"").unwrap();
        doc.set_inner_html(&div, "<svg>A</svg>").unwrap();
        doc.append_child(&body, &div).unwrap();

        assert_eq!(doc.parent(div), Some(body));
        assert!(doc.has_class(div, "b"));
        assert!(!doc.has_class(div, "c"));
        assert_eq!(
            doc.to_html(),
            "<body><div class=\"a b\" title=\"say &quot;hi&quot;\"><svg>A</svg></div></body>"
        );
    }

    #[test]
    fn test_set_attribute_replaces_existing() {
        let mut doc = MemoryDocument::new();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(&div, "title", "one").unwrap();
        doc.set_attribute(&div, "title", "two").unwrap();

        assert_eq!(doc.attribute(div, "title"), Some("two"));
    }

    #[test]
    fn test_style_set_and_remove() {
        let mut doc = MemoryDocument::new();
        let div = doc.create_element("div").unwrap();
        doc.set_style(&div, "display", "none").unwrap();
        doc.set_style(&div, "cursor", "pointer").unwrap();
        doc.set_style(&div, "display", "flex").unwrap();

        assert_eq!(doc.style(&div, "display").as_deref(), Some("flex"));
        assert_eq!(doc.style(&div, "cursor").as_deref(), Some("pointer"));

        doc.set_style(&div, "display", "").unwrap();
        assert_eq!(doc.style(&div, "display"), None);
    }

    #[test]
    fn test_style_attribute_is_parsed() {
        let mut doc = MemoryDocument::new();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(&div, "style", "overflow: scroll; color:red;").unwrap();

        assert_eq!(doc.style(&div, "overflow").as_deref(), Some("scroll"));
        assert_eq!(doc.style(&div, "color").as_deref(), Some("red"));
        assert_eq!(doc.attribute(div, "style"), Some("overflow: scroll; color:red;"));

        doc.set_style(&div, "color", "").unwrap();
        assert_eq!(doc.attribute(div, "style"), Some("overflow: scroll"));
        doc.set_style(&div, "overflow", "").unwrap();
        assert_eq!(doc.attribute(div, "style"), None);
    }

    #[test]
    fn test_style_semicolons_inside_values() {
        let mut doc = MemoryDocument::new();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(
            &div,
            "style",
            "background: url(data:image/png;base64,AAAA); font-family: 'A;B', serif",
        )
        .unwrap();

        assert_eq!(
            doc.style(&div, "background").as_deref(),
            Some("url(data:image/png;base64,AAAA)")
        );
        assert_eq!(doc.style(&div, "font-family").as_deref(), Some("'A;B', serif"));
    }

    #[test]
    fn test_set_inner_html_builds_elements() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        doc.set_inner_html(&body, r#"<svg id="d"><g class="node"><path d="M0 0"/></g></svg>"#)
            .unwrap();

        let svg = doc.child_elements(body)[0];
        let group = doc.query_class("node").unwrap()[0];
        assert_eq!(doc.tag(svg), Some("svg"));
        assert_eq!(doc.parent(group), Some(svg));
        assert_eq!(doc.tag(doc.child_elements(group)[0]), Some("path"));
    }

    #[test]
    fn test_set_inner_html_keeps_rejected_markup() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        doc.set_inner_html(&body, "<svg><!-- open").unwrap();

        assert_eq!(doc.children(body).len(), 1);
        assert_eq!(doc.inner_html(&body), "<svg><!-- open");
    }

    #[test]
    fn test_replaced_children_are_recycled() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        doc.set_inner_html(&body, "<svg><g><rect/></g></svg>").unwrap();
        let arena = doc.nodes.len();

        for _ in 0..10 {
            doc.set_inner_html(&body, "").unwrap();
            doc.set_inner_html(&body, "<svg><g><rect/></g></svg>").unwrap();
        }
        assert_eq!(doc.nodes.len(), arena);
        assert_eq!(doc.inner_html(&body), "<svg><g><rect/></g></svg>");
    }

    #[test]
    fn test_listened_nodes_are_not_recycled() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        doc.set_inner_html(&body, r#"<div class="d"><svg/></div>"#).unwrap();
        let div = doc.query_class("d").unwrap()[0];
        doc.listen(Target::Node(div), EventKind::Click).unwrap();

        doc.set_inner_html(&body, "<p>x</p>").unwrap();

        assert_eq!(doc.parent(div), None);
        assert_eq!(doc.tag(div), Some("div"));
        assert_eq!(doc.inner_html(&div), "<svg/>");
    }

    #[test]
    fn test_set_inner_html_replaces_children() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let child = doc.create_element("p").unwrap();
        doc.append_child(&body, &child).unwrap();

        doc.set_inner_html(&body, "<svg>B</svg>").unwrap();
        assert_eq!(doc.inner_html(&body), "<svg>B</svg>");
        assert_eq!(doc.parent(child), None);

        doc.set_inner_html(&body, "").unwrap();
        assert_eq!(doc.inner_html(&body), "");
        assert!(doc.children(body).is_empty());
    }

    #[test]
    fn test_set_text_escapes() {
        let mut doc = MemoryDocument::new();
        let button = doc.create_element("button").unwrap();
        doc.set_text(&button, "a < b").unwrap();

        assert_eq!(doc.inner_html(&button), "a &lt; b");
    }

    #[test]
    fn test_append_child_moves_node() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let a = doc.create_element("div").unwrap();
        let b = doc.create_element("div").unwrap();
        let child = doc.create_element("span").unwrap();
        doc.append_child(&body, &a).unwrap();
        doc.append_child(&body, &b).unwrap();
        doc.append_child(&a, &child).unwrap();
        doc.append_child(&b, &child).unwrap();

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
    }

    #[test]
    fn test_query_class_document_order() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let outer = doc.create_element("section").unwrap();
        let first = doc.create_element("div").unwrap();
        let second = doc.create_element("div").unwrap();
        doc.set_attribute(&first, "class", "diagram").unwrap();
        doc.set_attribute(&second, "class", "x diagram").unwrap();
        doc.append_child(&body, &outer).unwrap();
        doc.append_child(&outer, &first).unwrap();
        doc.append_child(&body, &second).unwrap();

        assert_eq!(doc.query_class("diagram").unwrap(), vec![first, second]);
        assert!(doc.query_class("missing").unwrap().is_empty());
    }

    #[test]
    fn test_detached_nodes_are_not_queried() {
        let mut doc = MemoryDocument::new();
        let div = doc.create_element("div").unwrap();
        doc.set_attribute(&div, "class", "diagram").unwrap();

        assert!(doc.query_class("diagram").unwrap().is_empty());
    }

    #[test]
    fn test_click_events_bubble_in_order() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("span").unwrap();
        doc.append_child(&body, &outer).unwrap();
        doc.append_child(&outer, &inner).unwrap();
        doc.listen(Target::Window, EventKind::Click).unwrap();
        doc.listen(Target::Node(outer), EventKind::Click).unwrap();
        doc.listen(Target::Node(inner), EventKind::Click).unwrap();
        doc.listen(Target::Document, EventKind::KeyDown).unwrap();

        let events = doc.click_events(inner);
        let currents: Vec<_> = events.iter().map(|e| e.current.clone()).collect();
        assert_eq!(
            currents,
            vec![Target::Node(inner), Target::Node(outer), Target::Window]
        );
        assert!(events.iter().all(|e| e.target == Some(inner)));
    }

    #[test]
    fn test_key_events() {
        let mut doc = MemoryDocument::new();
        assert!(doc.key_events("Escape").is_empty());

        doc.listen(Target::Document, EventKind::KeyDown).unwrap();
        let events = doc.key_events("Escape");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].current, Target::Document);
        assert_eq!(events[0].key.as_deref(), Some("Escape"));
    }

    #[test]
    fn test_listener_count() {
        let mut doc = MemoryDocument::new();
        doc.listen(Target::Window, EventKind::Click).unwrap();
        doc.listen(Target::Window, EventKind::Click).unwrap();

        assert_eq!(doc.listener_count(&Target::Window, EventKind::Click), 2);
        assert_eq!(doc.listener_count(&Target::Window, EventKind::KeyDown), 0);
        assert_eq!(doc.listeners().len(), 2);
    }
}
