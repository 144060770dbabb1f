//! Math utilities and types
//!
//! Normalized layout math for the viewport transform.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Round a pixel-space vector to the nearest integer grid point
pub fn round_to_pixels(v: &Vec2) -> (i32, i32) {
    (v.x.round() as i32, v.y.round() as i32)
}
