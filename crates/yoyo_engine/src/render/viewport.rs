//! Viewport transform
//!
//! Converts resolution-independent placements (fractions of the screen) into
//! pixel rectangles for the current screen size.

use crate::foundation::math::{round_to_pixels, Vec2};
use crate::input::collision;

/// Axis-aligned rectangle in screen pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl PixelRect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// True when the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check whether a screen point falls inside this rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        collision::point_in_rect(x, y, self)
    }
}

/// Normalized placement of a render object
///
/// `x`, `y`, `w` and `h` are fractions of the screen size. When `centered`
/// is set, `(x, y)` is the centre of the shape instead of its top-left
/// corner. Values outside `[0, 1]` are allowed and simply land off-screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Anchor position as a fraction of the screen
    pub position: Vec2,
    /// Size as a fraction of the screen
    pub size: Vec2,
    /// Whether `position` is the centre of the shape
    pub centered: bool,
}

impl Placement {
    /// Placement anchored at the top-left corner
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(w, h),
            centered: false,
        }
    }

    /// Placement anchored at its centre
    pub fn centered(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            centered: true,
            ..Self::new(x, y, w, h)
        }
    }

    /// Map this placement onto a screen of the given pixel size
    pub fn place(&self, screen: Vec2) -> PixelRect {
        let size = self.size.component_mul(&screen);
        let mut origin = self.position.component_mul(&screen);
        if self.centered {
            origin -= size / 2.0;
        }

        let (x, y) = round_to_pixels(&origin);
        let (w, h) = round_to_pixels(&size);
        PixelRect { x, y, w, h }
    }
}

/// Current screen dimensions
///
/// Only changes through [`Viewport::resize`], which the host calls on
/// resize notifications from the window collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Create a viewport of the given pixel size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Update the screen size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Screen width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Screen height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Screen size as a float vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Map a placement onto this viewport
    pub fn place(&self, placement: &Placement) -> PixelRect {
        placement.place(self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_placement() {
        let viewport = Viewport::new(800, 600);
        let rect = viewport.place(&Placement::new(0.25, 0.5, 0.5, 0.1));
        assert_eq!(rect, PixelRect::new(200, 300, 400, 60));
    }

    #[test]
    fn test_centered_placement_shifts_by_half_size() {
        let viewport = Viewport::new(800, 600);
        let plain = viewport.place(&Placement::new(0.5, 0.5, 0.25, 0.5));
        let centered = viewport.place(&Placement::centered(0.5, 0.5, 0.25, 0.5));

        assert_eq!(centered.w, plain.w);
        assert_eq!(centered.h, plain.h);
        assert_eq!(centered.x, plain.x - plain.w / 2);
        assert_eq!(centered.y, plain.y - plain.h / 2);
    }

    #[test]
    fn test_full_screen_centered_image() {
        let viewport = Viewport::new(1280, 720);
        let rect = viewport.place(&Placement::centered(0.5, 0.5, 1.0, 1.0));
        assert_eq!(rect, PixelRect::new(0, 0, 1280, 720));
    }

    #[test]
    fn test_out_of_range_fractions_are_kept() {
        let viewport = Viewport::new(1280, 720);
        let rect = viewport.place(&Placement::centered(0.0, 0.0, 1.0, 1.0));
        assert_eq!(rect, PixelRect::new(-640, -360, 1280, 720));

        let oversized = viewport.place(&Placement::new(-0.5, 1.5, 2.0, 0.0));
        assert_eq!(oversized, PixelRect::new(-640, 1080, 2560, 0));
        assert!(oversized.is_empty());
    }

    #[test]
    fn test_resize_changes_mapping() {
        let mut viewport = Viewport::new(1280, 720);
        let placement = Placement::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(viewport.place(&placement), PixelRect::new(640, 360, 640, 360));

        viewport.resize(1920, 1080);
        assert_eq!(viewport.place(&placement), PixelRect::new(960, 540, 960, 540));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = PixelRect::new(10, 10, 20, 20);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(29, 29));
        assert!(!rect.contains(30, 10));
        assert!(!rect.contains(10, 30));
        assert!(!rect.contains(9, 15));
    }
}
