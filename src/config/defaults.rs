//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [diagram] Section Defaults
// ============================================================================

pub mod diagram {
    /// Class the docs framework puts on every rendered mermaid container.
    pub fn marker() -> String {
        "docusaurus-mermaid-container".into()
    }

    pub fn hint() -> String {
        "Click to enlarge".into()
    }

    pub fn cursor() -> String {
        "pointer".into()
    }
}

// ============================================================================
// [overlay] Section Defaults
// ============================================================================

pub mod overlay {
    pub fn class() -> String {
        "diagram-lightbox".into()
    }

    pub fn content_class() -> String {
        "diagram-lightbox-content".into()
    }

    pub fn close_class() -> String {
        "diagram-lightbox-close".into()
    }

    pub fn close_label() -> String {
        "\u{00d7}".into()
    }

    pub fn close_title() -> String {
        "Close".into()
    }

    pub fn backdrop() -> String {
        "rgba(0, 0, 0, 0.85)".into()
    }

    pub fn content_background() -> String {
        "var(--ifm-background-color, #fff)".into()
    }

    pub fn z_index() -> u32 {
        9999
    }
}
