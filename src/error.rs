//! Error types for the lightbox and its document backends.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LightboxError>;

/// Lightbox-related errors
#[derive(Debug, Error)]
pub enum LightboxError {
    #[error("markup error at position {position}: {message}")]
    Markup { position: u64, message: String },

    #[error("DOM call failed: {0}")]
    Js(String),

    #[error("`{0}` is not available")]
    MissingGlobal(&'static str),
}
