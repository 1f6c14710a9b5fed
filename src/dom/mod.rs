//! The document seam the lightbox controller runs against.
//!
//! ```text
//!                 ┌────────────────────┐
//!                 │ LightboxController │
//!                 └─────────┬──────────┘
//!                           │ Dom
//!            ┌──────────────┴──────────────┐
//!            ▼                             ▼
//!   ┌────────────────┐            ┌────────────────┐
//!   │ MemoryDocument │            │ WebDom (wasm)  │
//!   └────────────────┘            └────────────────┘
//! ```
//!
//! Backends report user interaction back to the controller as [`DomEvent`]s,
//! one per registered listener that the event reaches.

pub mod html;
pub mod memory;

pub use memory::{MemoryDocument, NodeId};

use crate::error::Result;
use std::fmt::Debug;

/// Where a listener is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<N> {
    Window,
    Document,
    Node(N),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
}

impl EventKind {
    /// DOM event type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
        }
    }
}

/// An event as seen by one listener.
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent<N> {
    pub kind: EventKind,
    /// The listener's registration target.
    pub current: Target<N>,
    /// The node the event originated from.
    pub target: Option<N>,
    /// `KeyboardEvent.key` for keydown events.
    pub key: Option<String>,
}

impl<N> DomEvent<N> {
    pub fn click(current: Target<N>, target: Option<N>) -> Self {
        Self {
            kind: EventKind::Click,
            current,
            target,
            key: None,
        }
    }

    pub fn key_down(current: Target<N>, key: impl Into<String>) -> Self {
        Self {
            kind: EventKind::KeyDown,
            current,
            target: None,
            key: Some(key.into()),
        }
    }
}

/// Minimal document API needed by the lightbox.
///
/// Node handles are compared by identity through `PartialEq`.
pub trait Dom {
    type Node: Clone + PartialEq + Debug;

    /// All elements whose class list contains `class`, in document order.
    fn query_class(&self, class: &str) -> Result<Vec<Self::Node>>;

    fn body(&self) -> Result<Self::Node>;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Inline style value, `None` when the property is not set.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Set an inline style property. An empty value removes the property.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str) -> Result<()>;

    /// Replace all children with a single text node.
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<()>;

    fn inner_html(&self, node: &Self::Node) -> String;

    fn set_inner_html(&mut self, node: &Self::Node, markup: &str) -> Result<()>;

    /// Register a listener for `kind` on `target`.
    ///
    /// Every call adds one more listener; callers are responsible for not
    /// registering twice.
    fn listen(&mut self, target: Target<Self::Node>, kind: EventKind) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Click.as_str(), "click");
        assert_eq!(EventKind::KeyDown.as_str(), "keydown");
    }

    #[test]
    fn test_key_down_event_has_no_target() {
        let event: DomEvent<NodeId> = DomEvent::key_down(Target::Document, "Escape");
        assert_eq!(event.kind, EventKind::KeyDown);
        assert_eq!(event.key.as_deref(), Some("Escape"));
        assert!(event.target.is_none());
    }
}
