//! Render target trait
//!
//! Defines the interface between the compositor and the display surface.
//! Keeps the scene code independent of how pixels reach the screen.

use super::{Color, PixelRect, RenderResult, Texture};

/// Backend-agnostic drawing surface
pub trait RenderTarget {
    /// Start a frame by clearing the back buffer
    fn begin_frame(&mut self, clear_color: Color);

    /// Draw a texture scaled into `rect`
    ///
    /// Parts of `rect` outside the surface are clipped.
    fn draw_texture(&mut self, texture: &Texture, rect: PixelRect) -> RenderResult<()>;

    /// Show the finished back buffer
    fn present(&mut self) -> RenderResult<()>;

    /// Get current surface size
    fn size(&self) -> (u32, u32);

    /// Update surface size after a resize notification
    fn resize(&mut self, width: u32, height: u32);

    /// Copy of the last presented frame, when the backend can provide one
    fn capture(&self) -> Option<image::RgbaImage> {
        None
    }
}
