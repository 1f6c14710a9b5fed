//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or checking `lightbox.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read lightbox config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid lightbox config")]
    Toml(#[from] toml::de::Error),

    #[error("[{key}] {reason}")]
    Validation { key: &'static str, reason: String },
}

impl ConfigError {
    pub(super) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            key,
            reason: reason.into(),
        }
    }
}
