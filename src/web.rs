//! Browser binding: [`Dom`] over `web_sys` and the module start hook.
//!
//! The controller lives in an `Rc<RefCell<_>>`. Every listener closure holds
//! a `Weak` to it and borrows it for one event. Closures are owned by the
//! [`WebDom`] and live as long as the page.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, Window};

use crate::config::LightboxConfig;
use crate::controller::LightboxController;
use crate::dom::{Dom, DomEvent, EventKind, Target};
use crate::error::{LightboxError, Result};
use crate::log;

type Shared = Rc<RefCell<LightboxController<WebDom>>>;

thread_local! {
    static CONTROLLER: RefCell<Option<Shared>> = const { RefCell::new(None) };
}

impl From<JsValue> for LightboxError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// The live browser document.
pub struct WebDom {
    window: Window,
    document: Document,
    controller: Weak<RefCell<LightboxController<WebDom>>>,
    closures: Vec<Closure<dyn FnMut(Event)>>,
}

impl std::fmt::Debug for WebDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDom")
            .field("listeners", &self.closures.len())
            .finish_non_exhaustive()
    }
}

impl WebDom {
    fn new(
        window: Window,
        document: Document,
        controller: Weak<RefCell<LightboxController<WebDom>>>,
    ) -> Self {
        Self {
            window,
            document,
            controller,
            closures: Vec::new(),
        }
    }

    fn html_element(node: &Element) -> Option<&HtmlElement> {
        node.dyn_ref::<HtmlElement>()
    }
}

/// Translate a browser event for the listener registered on `current`.
fn translate(event: &Event, kind: EventKind, current: Target<Element>) -> DomEvent<Element> {
    let target = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    let key = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key);
    DomEvent {
        kind,
        current,
        target,
        key,
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn query_class(&self, class: &str) -> Result<Vec<Element>> {
        let collection = self.document.get_elements_by_class_name(class);
        // The collection is live; copy it so later DOM changes do not shift it.
        Ok((0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect())
    }

    fn body(&self) -> Result<Element> {
        self.document
            .body()
            .map(Element::from)
            .ok_or(LightboxError::MissingGlobal("document.body"))
    }

    fn create_element(&mut self, tag: &str) -> Result<Element> {
        Ok(self.document.create_element(tag)?)
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<()> {
        parent.append_child(child)?;
        Ok(())
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<()> {
        Ok(node.set_attribute(name, value)?)
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        let value = Self::html_element(node)?
            .style()
            .get_property_value(property)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&mut self, node: &Element, property: &str, value: &str) -> Result<()> {
        // SVG elements have no inline style API through HtmlElement.
        let Some(element) = Self::html_element(node) else {
            return Ok(());
        };
        let style = element.style();
        if value.is_empty() {
            style.remove_property(property)?;
        } else {
            style.set_property(property, value)?;
        }
        Ok(())
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<()> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn inner_html(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_inner_html(&mut self, node: &Element, markup: &str) -> Result<()> {
        node.set_inner_html(markup);
        Ok(())
    }

    fn listen(&mut self, target: Target<Element>, kind: EventKind) -> Result<()> {
        let controller = self.controller.clone();
        let current = target.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            let event = translate(&event, kind, current.clone());
            // A listener fired from inside another handler finds the controller
            // borrowed; that event is dropped.
            let Ok(mut controller) = controller.try_borrow_mut() else {
                return;
            };
            if let Err(err) = controller.handle_event(&event) {
                log!("error"; "{} handler failed: {err}", kind.as_str());
            }
        }) as Box<dyn FnMut(Event)>);

        let callback = closure.as_ref().unchecked_ref();
        match &target {
            Target::Window => self.window.add_event_listener_with_callback(kind.as_str(), callback)?,
            Target::Document => self
                .document
                .add_event_listener_with_callback(kind.as_str(), callback)?,
            Target::Node(node) => node.add_event_listener_with_callback(kind.as_str(), callback)?,
        }

        self.closures.push(closure);
        Ok(())
    }
}

/// Build (or reuse) the page's controller and initialize it.
fn mount(window: Window, document: Document) -> Result<()> {
    let shared = CONTROLLER.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| {
                Rc::new_cyclic(|weak| {
                    let dom = WebDom::new(window, document, weak.clone());
                    RefCell::new(LightboxController::new(dom, LightboxConfig::default()))
                })
            })
            .clone()
    });

    let mut controller = shared
        .try_borrow_mut()
        .map_err(|_| LightboxError::Js("lightbox controller is busy".into()))?;
    controller.initialize()
}

/// Module entry point: runs once the wasm module is instantiated.
///
/// Waits for `DOMContentLoaded` when the document is still loading.
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or(LightboxError::MissingGlobal("window"))?;
    let document = window
        .document()
        .ok_or(LightboxError::MissingGlobal("document"))?;

    if document.ready_state() == "loading" {
        let (w, d) = (window.clone(), document.clone());
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = mount(w, d) {
                log!("error"; "lightbox init failed: {err}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }

    mount(window, document)?;
    Ok(())
}

impl From<LightboxError> for JsValue {
    fn from(err: LightboxError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
