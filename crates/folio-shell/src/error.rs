//! Rendering errors shared by the shell regions.

use folio_core::LinkError;
use thiserror::Error;

use crate::template::TemplateError;

/// Region rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// A link in a region's table is invalid.
    #[error("link error: {0}")]
    Link(#[from] LinkError),
}

/// Result type for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;
