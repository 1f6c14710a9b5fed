//! The diagram lightbox controller.
//!
//! One controller per page. [`LightboxController::initialize`] scans the
//! document for diagram nodes once, builds a single shared overlay and
//! registers the listeners; afterwards the backend feeds every event through
//! [`LightboxController::handle_event`].
//!
//! ```text
//!             diagram click
//!   Hidden ───────────────────► Visible
//!     ▲                            │
//!     └────────────────────────────┘
//!      close click | backdrop click | Escape
//! ```

use crate::config::LightboxConfig;
use crate::dom::{Dom, DomEvent, EventKind, MemoryDocument, NodeId, Target};
use crate::error::Result;
use crate::{log, logger};

/// Overlay visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// Handles to the overlay nodes, built once per page.
#[derive(Debug, Clone)]
pub struct Overlay<N> {
    pub backdrop: N,
    pub close: N,
    pub content: N,
}

/// Click-to-enlarge controller for diagram nodes.
#[derive(Debug)]
pub struct LightboxController<D: Dom> {
    dom: D,
    config: LightboxConfig,
    overlay: Option<Overlay<D::Node>>,
    diagrams: Vec<D::Node>,
    visibility: Visibility,
    /// Body `overflow` before the scroll lock; `Some` only while open.
    saved_overflow: Option<String>,
}

impl<D: Dom> LightboxController<D> {
    /// `[log] enable = true` turns logging on for the page.
    pub fn new(dom: D, config: LightboxConfig) -> Self {
        if config.log.enable {
            logger::set_enabled(true);
        }
        Self {
            dom,
            config,
            overlay: None,
            diagrams: Vec::new(),
            visibility: Visibility::Hidden,
            saved_overflow: None,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &LightboxConfig {
        &self.config
    }

    pub fn overlay(&self) -> Option<&Overlay<D::Node>> {
        self.overlay.as_ref()
    }

    /// Diagram nodes found by the last effective `initialize`.
    pub fn diagrams(&self) -> &[D::Node] {
        &self.diagrams
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Discover diagram nodes, build the overlay and register listeners.
    ///
    /// Does nothing when the page has no diagrams or the overlay already
    /// exists.
    pub fn initialize(&mut self) -> Result<()> {
        if self.overlay.is_some() {
            log!("lightbox"; "already initialized");
            return Ok(());
        }

        let diagrams = self.dom.query_class(&self.config.diagram.marker)?;
        if diagrams.is_empty() {
            log!("lightbox"; "no `.{}` nodes, skipping", self.config.diagram.marker);
            return Ok(());
        }

        let overlay = self.build_overlay()?;
        self.dom.listen(Target::Node(overlay.close.clone()), EventKind::Click)?;
        self.dom.listen(Target::Window, EventKind::Click)?;
        self.dom.listen(Target::Document, EventKind::KeyDown)?;

        for diagram in &diagrams {
            self.dom.set_style(diagram, "cursor", &self.config.diagram.cursor)?;
            self.dom.set_attribute(diagram, "title", &self.config.diagram.hint)?;
            self.dom.listen(Target::Node(diagram.clone()), EventKind::Click)?;
        }

        log!("lightbox"; "wired {} diagrams", diagrams.len());
        self.overlay = Some(overlay);
        self.diagrams = diagrams;
        Ok(())
    }

    /// Show `node`'s markup in the overlay and lock page scrolling.
    pub fn open(&mut self, node: &D::Node) -> Result<()> {
        let Some(overlay) = &self.overlay else {
            return Ok(());
        };

        let body = self.dom.body()?;
        let markup = self.dom.inner_html(node);
        self.dom.set_inner_html(&overlay.content, &markup)?;
        self.dom.set_style(&overlay.backdrop, "display", "flex")?;
        // Visible as soon as the backdrop is shown.
        self.visibility = Visibility::Visible;

        if self.saved_overflow.is_none() {
            self.saved_overflow = Some(self.dom.style(&body, "overflow").unwrap_or_default());
        }
        self.dom.set_style(&body, "overflow", "hidden")?;

        log!("open"; "{} bytes of markup", markup.len());
        Ok(())
    }

    /// Hide the overlay, drop its content and restore page scrolling.
    pub fn close(&mut self) -> Result<()> {
        let Some(overlay) = &self.overlay else {
            return Ok(());
        };

        self.dom.set_style(&overlay.backdrop, "display", "none")?;
        // Copied markup may carry ids and <defs> that must not outlive the view.
        self.dom.set_inner_html(&overlay.content, "")?;

        if let Some(overflow) = self.saved_overflow.take() {
            let body = self.dom.body()?;
            self.dom.set_style(&body, "overflow", &overflow)?;
        }

        if self.is_visible() {
            log!("close"; "overlay hidden");
        }
        self.visibility = Visibility::Hidden;
        Ok(())
    }

    /// Route one listener invocation.
    pub fn handle_event(&mut self, event: &DomEvent<D::Node>) -> Result<()> {
        let Some(overlay) = &self.overlay else {
            return Ok(());
        };

        match (event.kind, &event.current) {
            (EventKind::Click, Target::Node(node)) if *node == overlay.close => self.close(),
            (EventKind::Click, Target::Node(node)) if self.diagrams.contains(node) => {
                let node = node.clone();
                self.open(&node)
            }
            (EventKind::Click, Target::Window)
                if self.is_visible() && event.target.as_ref() == Some(&overlay.backdrop) =>
            {
                self.close()
            }
            (EventKind::KeyDown, Target::Document)
                if self.is_visible() && event.key.as_deref().is_some_and(is_escape) =>
            {
                self.close()
            }
            _ => Ok(()),
        }
    }

    /// Backdrop with a close control and a content container, appended to
    /// the body and hidden.
    fn build_overlay(&mut self) -> Result<Overlay<D::Node>> {
        let cfg = &self.config.overlay;
        let dom = &mut self.dom;

        let backdrop = dom.create_element("div")?;
        dom.set_attribute(&backdrop, "class", &cfg.class)?;
        for (property, value) in [
            ("display", "none"),
            ("position", "fixed"),
            ("inset", "0"),
            ("align-items", "center"),
            ("justify-content", "center"),
            ("padding", "2rem"),
            ("box-sizing", "border-box"),
            ("background", cfg.backdrop.as_str()),
        ] {
            dom.set_style(&backdrop, property, value)?;
        }
        dom.set_style(&backdrop, "z-index", &cfg.z_index.to_string())?;

        let close = dom.create_element("button")?;
        dom.set_attribute(&close, "type", "button")?;
        dom.set_attribute(&close, "class", &cfg.close_class)?;
        dom.set_attribute(&close, "title", &cfg.close_title)?;
        dom.set_text(&close, &cfg.close_label)?;
        for (property, value) in [
            ("position", "absolute"),
            ("top", "1rem"),
            ("right", "1.5rem"),
            ("border", "none"),
            ("background", "none"),
            ("color", "#fff"),
            ("font-size", "2rem"),
            ("cursor", "pointer"),
        ] {
            dom.set_style(&close, property, value)?;
        }

        let content = dom.create_element("div")?;
        dom.set_attribute(&content, "class", &cfg.content_class)?;
        for (property, value) in [
            ("max-width", "95vw"),
            ("max-height", "95vh"),
            ("overflow", "auto"),
            ("padding", "1rem"),
            ("border-radius", "8px"),
            ("background", cfg.content_background.as_str()),
        ] {
            dom.set_style(&content, property, value)?;
        }

        dom.append_child(&backdrop, &close)?;
        dom.append_child(&backdrop, &content)?;
        let body = dom.body()?;
        dom.append_child(&body, &backdrop)?;

        Ok(Overlay {
            backdrop,
            close,
            content,
        })
    }
}

/// `Esc` is what older browsers report.
#[inline]
fn is_escape(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

impl LightboxController<MemoryDocument> {
    /// Click `node` and deliver the event to every listener it reaches.
    pub fn click(&mut self, node: NodeId) -> Result<()> {
        for event in self.dom.click_events(node) {
            self.handle_event(&event)?;
        }
        Ok(())
    }

    /// Press `key` with nothing focused.
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        for event in self.dom.key_events(key) {
            self.handle_event(&event)?;
        }
        Ok(())
    }
}
