//! Texture factory
//!
//! Builds drawable surfaces from text or image files. A [`Texture`] is a
//! single-owner value: it is not `Clone`, it is owned by exactly one render
//! object, and its pixels are released when that object is dropped.

use std::path::Path;

use image::{imageops, RgbaImage};

use super::{Color, Font, RenderError, RenderResult};

/// Fraction of a button face the label may cover
const BUTTON_LABEL_FILL: f32 = 0.8;

/// An owned RGBA surface
#[derive(Debug)]
pub struct Texture {
    image: RgbaImage,
}

impl Texture {
    /// Wrap decoded pixels
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode an image file into a texture
    ///
    /// Any format enabled on the `image` crate is accepted; the pixels are
    /// converted to RGBA8.
    pub fn from_image(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading image texture from {:?}", path);

        let image = image::open(path)
            .map_err(|source| RenderError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        log::debug!("Loaded {}x{} image from {:?}", image.width(), image.height(), path);
        Ok(Self { image })
    }

    /// Rasterize a single line of text
    ///
    /// Empty text yields a 1x1 transparent texture.
    pub fn from_text(text: &str, font: &Font, color: Color) -> RenderResult<Self> {
        if text.is_empty() {
            return Ok(Self::solid(1, 1, Color::TRANSPARENT));
        }
        font.rasterize_line(text, color).map(Self::from_rgba)
    }

    /// Single-colour texture
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(color.to_array())),
        }
    }

    /// Build a button face: `label` scaled to fit and centred over `background`
    ///
    /// Without a background the label itself is the face.
    pub fn compose_button(background: Option<Self>, label: Self) -> Self {
        let Some(mut background) = background else {
            return label;
        };

        let (bg_w, bg_h) = background.dimensions();
        let (label_w, label_h) = label.dimensions();
        if bg_w == 0 || bg_h == 0 || label_w == 0 || label_h == 0 {
            return background;
        }

        let scale = (bg_w as f32 * BUTTON_LABEL_FILL / label_w as f32)
            .min(bg_h as f32 * BUTTON_LABEL_FILL / label_h as f32);
        let fit_w = ((label_w as f32 * scale).round() as u32).max(1);
        let fit_h = ((label_h as f32 * scale).round() as u32).max(1);

        let fitted = imageops::resize(&label.image, fit_w, fit_h, imageops::FilterType::Triangle);
        let x = i64::from((bg_w - fit_w) / 2);
        let y = i64::from((bg_h - fit_h) / 2);

        let mut face = std::mem::take(&mut background.image);
        imageops::overlay(&mut face, &fitted, x, y);
        Self { image: face }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Pixel at `(x, y)`; the caller keeps coordinates in bounds
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        Color::from(*self.image.get_pixel(x, y))
    }

    /// Underlying pixel buffer
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        log::trace!("Released {}x{} texture", self.image.width(), self.image.height());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_font, write_png};
    use tempfile::tempdir;

    #[test]
    fn test_solid_texture() {
        let texture = Texture::solid(3, 2, Color::rgb(10, 20, 30));
        assert_eq!(texture.dimensions(), (3, 2));
        assert_eq!(texture.pixel(2, 1), Color::rgb(10, 20, 30));
    }

    #[test]
    fn test_from_image_loads_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logo.png");
        write_png(&path, 8, 4, Color::rgb(0, 255, 0));

        let texture = Texture::from_image(&path).unwrap();
        assert_eq!(texture.dimensions(), (8, 4));
        assert_eq!(texture.pixel(0, 0), Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_from_image_missing_file_fails() {
        let result = Texture::from_image("missing.png");
        assert!(matches!(result, Err(RenderError::ImageLoad { .. })));
    }

    #[test]
    fn test_from_image_garbage_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(Texture::from_image(&path).is_err());
    }

    #[test]
    fn test_from_text_empty_is_one_transparent_pixel() {
        let texture = Texture::from_text("", &test_font(48.0), Color::WHITE).unwrap();
        assert_eq!(texture.dimensions(), (1, 1));
        assert_eq!(texture.pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn test_from_text_scales_with_font_size() {
        let small = Texture::from_text("fps: 60", &test_font(24.0), Color::YELLOW).unwrap();
        let large = Texture::from_text("fps: 60", &test_font(96.0), Color::YELLOW).unwrap();

        assert!(small.width() > 1 && small.height() > 1);
        assert!(large.width() > small.width() * 3);
        assert!(large.height() > small.height() * 3);
    }

    #[test]
    fn test_compose_button_without_background_is_label() {
        let label = Texture::solid(5, 3, Color::WHITE);
        let face = Texture::compose_button(None, label);
        assert_eq!(face.dimensions(), (5, 3));
    }

    #[test]
    fn test_compose_button_centres_label() {
        let background = Texture::solid(100, 50, Color::BLACK);
        let label = Texture::solid(400, 100, Color::WHITE);
        let face = Texture::compose_button(Some(background), label);

        assert_eq!(face.dimensions(), (100, 50));
        // Label scaled to 80px wide, 20px tall, centred
        let centre = face.pixel(50, 25);
        assert!(centre.r > 250 && centre.g > 250 && centre.b > 250);
        assert_eq!(face.pixel(5, 25), Color::BLACK);
        assert_eq!(face.pixel(50, 5), Color::BLACK);
    }
}
