//! Lightbox configuration from `lightbox.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[diagram]` | Marker class, hover hint and cursor            |
//! | `[overlay]` | Overlay class names, close label, colors       |
//! | `[log]`     | Diagnostic output                              |
//!
//! Every field has a default, so an empty file is a valid configuration.
//! The browser build always runs with [`LightboxConfig::default`].
//!
//! # Example
//!
//! ```toml
//! [diagram]
//! marker = "docusaurus-mermaid-container"
//! hint = "Click to enlarge"
//!
//! [overlay]
//! backdrop = "rgba(0, 0, 0, 0.85)"
//!
//! [log]
//! enable = true
//! ```

pub mod defaults;
mod diagram;
mod error;
mod overlay;

pub use diagram::DiagramConfig;
pub use error::ConfigError;
pub use overlay::OverlayConfig;

use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing lightbox.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LightboxConfig {
    /// Diagram node discovery
    #[serde(default)]
    pub diagram: DiagramConfig,

    /// Overlay appearance
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Diagnostic output
    #[serde(default)]
    pub log: LogConfig,
}

/// `[log]` section in lightbox.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Print `[lightbox]` messages (terminal or browser console).
    #[serde(default)]
    pub enable: bool,
}

impl LightboxConfig {
    /// Parse and validate configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: LightboxConfig = toml::from_str(content).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Validate fields that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let marker = self.diagram.marker.as_str();
        if marker.is_empty() {
            bail!(ConfigError::invalid("diagram.marker", "must not be empty"));
        }
        if marker.chars().any(char::is_whitespace) {
            bail!(ConfigError::invalid(
                "diagram.marker",
                format!("must be a single class name, got `{marker}`")
            ));
        }

        for (key, class) in [
            ("overlay.class", &self.overlay.class),
            ("overlay.content_class", &self.overlay.content_class),
            ("overlay.close_class", &self.overlay.close_class),
        ] {
            if class == marker {
                bail!(ConfigError::invalid(key, "must differ from [diagram.marker]"));
            }
        }

        if self.overlay.close_label.trim().is_empty() {
            bail!(ConfigError::invalid("overlay.close_label", "must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = LightboxConfig::from_str("").unwrap();

        assert_eq!(config.diagram.marker, "docusaurus-mermaid-container");
        assert_eq!(config.overlay.class, "diagram-lightbox");
        assert!(!config.log.enable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_matches_empty_toml() {
        let parsed = LightboxConfig::from_str("").unwrap();
        let default = LightboxConfig::default();

        assert_eq!(parsed.diagram.marker, default.diagram.marker);
        assert_eq!(parsed.diagram.hint, default.diagram.hint);
        assert_eq!(parsed.overlay.close_label, default.overlay.close_label);
        assert_eq!(parsed.overlay.z_index, default.overlay.z_index);
    }

    #[test]
    fn test_log_section() {
        let config = r#"
            [log]
            enable = true
        "#;
        let config = LightboxConfig::from_str(config).unwrap();
        assert!(config.log.enable);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [diagram]
            marker = "mermaid"
            selector = ".mermaid"
        "#;
        let result = LightboxConfig::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_unknown_section_rejection() {
        let result = LightboxConfig::from_str("[animation]\nduration = 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_marker() {
        let mut config = LightboxConfig::default();
        config.diagram.marker = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[diagram.marker]"));
    }

    #[test]
    fn test_validate_marker_with_whitespace() {
        let mut config = LightboxConfig::default();
        config.diagram.marker = "mermaid diagram".into();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("single class name"));
    }

    #[test]
    fn test_validate_marker_clashes_with_overlay_class() {
        let mut config = LightboxConfig::default();
        config.diagram.marker = config.overlay.content_class.clone();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[overlay.content_class]"));
    }

    #[test]
    fn test_validate_empty_close_label() {
        let mut config = LightboxConfig::default();
        config.overlay.close_label = "  ".into();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_str_rejects_invalid_marker() {
        let config = r#"
            [diagram]
            marker = "mermaid diagram"
        "#;
        let err = LightboxConfig::from_str(config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Validation { key: "diagram.marker", .. })
        ));
    }

    #[test]
    fn test_from_path_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lightbox.toml");
        fs::write(&path, "[overlay]\nclose_label = \"\"").unwrap();

        let err = LightboxConfig::from_path(&path).unwrap_err().to_string();
        assert!(err.contains("[overlay.close_label]"));
    }

    #[test]
    fn test_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lightbox.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[diagram]\nmarker = \"mermaid\"").unwrap();

        let config = LightboxConfig::from_path(&path).unwrap();
        assert_eq!(config.diagram.marker, "mermaid");
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let err = LightboxConfig::from_path(&path).unwrap_err();
        let err = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(err, ConfigError::Io(p, _) if p == &path));
    }
}
