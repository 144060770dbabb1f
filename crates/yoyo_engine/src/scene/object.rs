//! Render object representation for the scene

use crate::render::{PixelRect, Placement, Texture, Viewport};

/// What produced a render object's texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// Rasterized text label
    Text,
    /// Decoded image
    Image,
    /// Clickable button face
    Button,
}

/// An on-screen drawable unit
///
/// Owns its texture exclusively; dropping the object releases it.
#[derive(Debug)]
pub struct RenderObject {
    identifier: i32,
    depth: i32,
    kind: RenderKind,
    texture: Texture,
    placement: Placement,
    rect: PixelRect,
}

impl RenderObject {
    /// Create a render object placed on `viewport`
    pub fn new(
        identifier: i32,
        kind: RenderKind,
        depth: i32,
        placement: Placement,
        texture: Texture,
        viewport: &Viewport,
    ) -> Self {
        Self {
            identifier,
            depth,
            kind,
            texture,
            placement,
            rect: viewport.place(&placement),
        }
    }

    /// Caller-chosen identifier
    pub const fn identifier(&self) -> i32 {
        self.identifier
    }

    /// Draw order key (higher is on top)
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// Object kind
    pub const fn kind(&self) -> RenderKind {
        self.kind
    }

    /// Owned texture
    pub const fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Normalized placement the rect is derived from
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Current pixel rectangle
    pub const fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Reserved objects (negative identifier or depth) survive scene clears
    pub const fn is_reserved(&self) -> bool {
        self.identifier < 0 || self.depth < 0
    }

    /// Re-derive the pixel rect for a new viewport
    pub(crate) fn relayout(&mut self, viewport: &Viewport) {
        self.rect = viewport.place(&self.placement);
    }
}
