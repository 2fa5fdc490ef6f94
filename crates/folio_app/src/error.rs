//! Error types for Folio app composition

use crate::config::ConfigError;
use crate::contact::ContactError;
use folio_animation::{RevealError, TypewriterError};
use thiserror::Error;

/// Errors that can occur while assembling a [`crate::Portfolio`]
#[derive(Debug, Error)]
pub enum FolioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("reveal setup failed: {0}")]
    Reveal(#[from] RevealError),

    #[error("hero typewriter setup failed: {0}")]
    Typewriter(#[from] TypewriterError),

    #[error("contact link setup failed: {0}")]
    Contact(#[from] ContactError),
}

/// Result type for Folio app operations
pub type Result<T> = std::result::Result<T, FolioError>;
