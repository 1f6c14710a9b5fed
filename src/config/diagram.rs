//! `[diagram]` section configuration.
//!
//! Describes how diagram nodes are recognized and decorated.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[diagram]` section in lightbox.toml - diagram node discovery.
///
/// # Example
/// ```toml
/// [diagram]
/// marker = "mermaid"
/// hint = "Click to zoom"
/// cursor = "zoom-in"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DiagramConfig {
    /// Class name carried by every diagram node.
    #[serde(default = "defaults::diagram::marker")]
    #[educe(Default = defaults::diagram::marker())]
    pub marker: String,

    /// Tooltip (`title` attribute) set on each diagram node.
    #[serde(default = "defaults::diagram::hint")]
    #[educe(Default = defaults::diagram::hint())]
    pub hint: String,

    /// CSS cursor shown when hovering a diagram node.
    #[serde(default = "defaults::diagram::cursor")]
    #[educe(Default = defaults::diagram::cursor())]
    pub cursor: String,
}
