//! Frame compositor
//!
//! Full redraw every frame: clear, draw every render object in ascending
//! depth, present. There is no dirty tracking; the store is the complete
//! render state.

use super::{Color, RenderTarget};
use crate::scene::RenderObjectStore;

/// Draws the render object store onto a render target
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    clear_color: Color,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Compositor {
    /// Create a compositor that clears to `clear_color`
    pub const fn new(clear_color: Color) -> Self {
        Self { clear_color }
    }

    /// Back buffer clear color
    pub const fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Render one frame
    ///
    /// Never fails: an object that cannot be drawn is skipped with a warning,
    /// and a failed present is logged. An empty store still presents.
    pub fn render_all(&self, store: &RenderObjectStore, target: &mut dyn RenderTarget) {
        target.begin_frame(self.clear_color);

        for object in store.iter() {
            if let Err(e) = target.draw_texture(object.texture(), object.rect()) {
                log::warn!("Skipping render object {}: {}", object.identifier(), e);
            }
        }

        if let Err(e) = target.present() {
            log::error!("Failed to present frame: {}", e);
        }
    }
}
