//! # Rendering System
//!
//! Everything between a render object and the pixels on screen.
//!
//! ## Architecture
//!
//! - **Viewport**: normalized placement to pixel rectangle mapping
//! - **Texture / Font**: the texture factory (text rasterization, image decoding)
//! - **RenderTarget**: backend seam for the display surface
//! - **Framebuffer**: software RGBA render target
//! - **Compositor**: full-frame, depth-ordered redraw

pub mod viewport;
pub mod color;
pub mod texture;
pub mod font;
pub mod backend;
pub mod framebuffer;
pub mod compositor;

pub use viewport::{PixelRect, Placement, Viewport};
pub use color::Color;
pub use texture::Texture;
pub use font::Font;
pub use backend::RenderTarget;
pub use framebuffer::Framebuffer;
pub use compositor::Compositor;

use std::path::PathBuf;
use thiserror::Error;

/// Result type for texture and drawing operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors produced while building textures or drawing them
#[derive(Debug, Error)]
pub enum RenderError {
    /// An image file could not be opened or decoded
    #[error("Failed to load image {path:?}: {source}")]
    ImageLoad {
        /// Image path as given
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// A font file could not be read or parsed
    #[error("Failed to load font {path:?}: {reason}")]
    FontLoad {
        /// Font path as given
        path: PathBuf,
        /// Why loading failed
        reason: String,
    },

    /// Text rasterization produced no usable surface
    #[error("Failed to render text '{text}': {reason}")]
    TextRender {
        /// Text being rendered
        text: String,
        /// Why rendering failed
        reason: String,
    },

    /// A texture could not be drawn into its destination
    #[error("Draw failed: {0}")]
    Draw(String),

    /// The finished frame could not be presented
    #[error("Present failed: {0}")]
    Present(String),
}
