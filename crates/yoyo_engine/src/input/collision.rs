//! Collision detection for input processing
//!
//! Hit testing for render object rects. This is input system
//! responsibility - determining what the user clicked on.

use crate::render::PixelRect;

/// Check if a point is inside a rectangle
///
/// The left and top edges are inside, the right and bottom edges are not,
/// so two rects that share an edge never both claim a point on it.
///
/// # Arguments
/// * `point_x` - X coordinate of the point
/// * `point_y` - Y coordinate of the point
/// * `rect` - Rectangle in screen pixels
pub fn point_in_rect(point_x: i32, point_y: i32, rect: &PixelRect) -> bool {
    let (x, y) = (i64::from(point_x), i64::from(point_y));
    let (left, top) = (i64::from(rect.x), i64::from(rect.y));
    x >= left && x < left + i64::from(rect.w) && y >= top && y < top + i64::from(rect.h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_rect() {
        let rect = PixelRect::new(100, 100, 200, 100);

        // Point inside
        assert!(point_in_rect(150, 150, &rect));

        // Top-left edge is inside, bottom-right edge is outside
        assert!(point_in_rect(100, 100, &rect));
        assert!(point_in_rect(299, 199, &rect));
        assert!(!point_in_rect(300, 150, &rect));
        assert!(!point_in_rect(150, 200, &rect));

        // Point outside
        assert!(!point_in_rect(50, 50, &rect));
        assert!(!point_in_rect(350, 250, &rect));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        assert!(!point_in_rect(0, 0, &PixelRect::new(0, 0, 0, 10)));
        assert!(!point_in_rect(0, 0, &PixelRect::new(0, 0, 10, -5)));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let rect = PixelRect::new(i32::MAX - 1, 0, i32::MAX, 1);
        assert!(point_in_rect(i32::MAX, 0, &rect));
        assert!(!point_in_rect(i32::MIN, 0, &rect));
    }
}
