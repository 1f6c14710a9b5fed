//! Click-to-enlarge lightbox for diagrams on statically rendered pages.
//!
//! The docs site renders diagrams (mermaid SVG) inline. This crate adds a
//! single shared overlay: clicking a diagram copies its markup into the
//! overlay, and a close button, a backdrop click or `Escape` dismisses it.
//!
//! - [`LightboxController`] holds all state and is generic over [`Dom`]
//! - [`MemoryDocument`] is an in-memory [`Dom`] for headless use and tests
//! - `web` (wasm32 only) binds the controller to the browser and starts it
//!   when the module loads
//!
//! # Example
//!
//! ```
//! use diagram_lightbox::{LightboxConfig, LightboxController, MemoryDocument};
//!
//! let page = r#"<body><div class="docusaurus-mermaid-container"><svg>A</svg></div></body>"#;
//! let doc = MemoryDocument::parse(page).unwrap();
//! let mut lightbox = LightboxController::new(doc, LightboxConfig::default());
//! lightbox.initialize().unwrap();
//!
//! let diagram = lightbox.diagrams()[0];
//! lightbox.click(diagram).unwrap();
//! assert!(lightbox.is_visible());
//!
//! lightbox.press_key("Escape").unwrap();
//! assert!(!lightbox.is_visible());
//! ```

pub mod logger;

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::LightboxConfig;
pub use controller::{LightboxController, Overlay, Visibility};
pub use dom::{Dom, DomEvent, EventKind, MemoryDocument, NodeId, Target};
pub use error::{LightboxError, Result};
