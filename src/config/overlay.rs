//! `[overlay]` section configuration.
//!
//! Class names, labels and colors of the shared lightbox overlay.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[overlay]` section in lightbox.toml - the full-viewport backdrop.
///
/// # Example
/// ```toml
/// [overlay]
/// backdrop = "rgba(20, 20, 20, 0.9)"
/// close_label = "Close"
/// z_index = 500
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    /// Class of the backdrop element.
    #[serde(default = "defaults::overlay::class")]
    #[educe(Default = defaults::overlay::class())]
    pub class: String,

    /// Class of the content container.
    #[serde(default = "defaults::overlay::content_class")]
    #[educe(Default = defaults::overlay::content_class())]
    pub content_class: String,

    /// Class of the close control.
    #[serde(default = "defaults::overlay::close_class")]
    #[educe(Default = defaults::overlay::close_class())]
    pub close_class: String,

    /// Text of the close control.
    #[serde(default = "defaults::overlay::close_label")]
    #[educe(Default = defaults::overlay::close_label())]
    pub close_label: String,

    /// Tooltip of the close control.
    #[serde(default = "defaults::overlay::close_title")]
    #[educe(Default = defaults::overlay::close_title())]
    pub close_title: String,

    /// Backdrop color (any CSS color).
    #[serde(default = "defaults::overlay::backdrop")]
    #[educe(Default = defaults::overlay::backdrop())]
    pub backdrop: String,

    /// Background behind the enlarged diagram.
    #[serde(default = "defaults::overlay::content_background")]
    #[educe(Default = defaults::overlay::content_background())]
    pub content_background: String,

    /// Stacking order of the backdrop.
    #[serde(default = "defaults::overlay::z_index")]
    #[educe(Default = defaults::overlay::z_index())]
    pub z_index: u32,
}
