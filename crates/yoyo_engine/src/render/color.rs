//! RGBA colour and pixel type

use bytemuck::{Pod, Zeroable};

/// 8-bit RGBA colour, laid out exactly like an RGBA8 pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque yellow, used by the diagnostic overlay
    pub const YELLOW: Self = Self::rgba(255, 255, 0, 255);

    /// Create a colour from its channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Channels as an array
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Composite `self` over `dst` (source-over)
    pub fn over(self, dst: Self) -> Self {
        match self.a {
            0 => dst,
            255 => self,
            alpha => {
                let a = u16::from(alpha);
                let inv = 255 - a;
                let mix = |s: u8, d: u8| ((u16::from(s) * a + u16::from(d) * inv + 127) / 255) as u8;
                Self {
                    r: mix(self.r, dst.r),
                    g: mix(self.g, dst.g),
                    b: mix(self.b, dst.b),
                    a: (a + (u16::from(dst.a) * inv + 127) / 255) as u8,
                }
            }
        }
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }
}
