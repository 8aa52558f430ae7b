//! Render failure type.

use thiserror::Error;

/// Everything that can go wrong between a title and PNG bytes.
///
/// Callers treat all variants alike (serve the fallback image); the variant
/// only feeds diagnostics.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render failed: title is empty")]
    EmptyTitle,

    #[error("render failed: font setup: {0}")]
    Fonts(String),

    #[error("render failed: cannot compose SVG document")]
    Compose(#[from] std::fmt::Error),

    #[error("render failed: malformed SVG document")]
    Parse(#[from] usvg::Error),

    #[error("render failed: cannot allocate {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("render failed: PNG encoding")]
    Encode(#[from] image::ImageError),

    #[error("render failed: rasterizer produced no output")]
    EmptyOutput,
}
