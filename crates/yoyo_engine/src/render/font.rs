//! Font loading and line rasterization
//!
//! Fonts are loaded with `fontdue` and rasterized on the CPU at a fixed pixel
//! size. The resulting surface is scaled into the destination rect at draw
//! time, so large sizes give crisp text on big screens.

use std::path::Path;

use fontdue::{FontSettings, LineMetrics};
use image::RgbaImage;

use super::{Color, RenderError, RenderResult};

/// A loaded font at a fixed rasterization size
#[derive(Clone)]
pub struct Font {
    inner: fontdue::Font,
    size: f32,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Font {
    /// Load a TrueType/OpenType font file
    ///
    /// # Arguments
    ///
    /// * `path` - Font file path
    /// * `size` - Pixel size glyphs are rasterized at
    pub fn load(path: impl AsRef<Path>, size: f32) -> RenderResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| RenderError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let font = Self::from_bytes(&bytes, size).map_err(|e| match e {
            RenderError::FontLoad { reason, .. } => RenderError::FontLoad {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        log::info!("Loaded font {:?} at {}px", path, size);
        Ok(font)
    }

    /// Parse font data already in memory
    pub fn from_bytes(bytes: &[u8], size: f32) -> RenderResult<Self> {
        if !(size.is_finite() && size > 0.0) {
            return Err(RenderError::FontLoad {
                path: "<memory>".into(),
                reason: format!("invalid font size {size}"),
            });
        }

        let settings = FontSettings {
            scale: size,
            ..FontSettings::default()
        };
        let inner = fontdue::Font::from_bytes(bytes, settings).map_err(|e| RenderError::FontLoad {
            path: "<memory>".into(),
            reason: format!("fontdue error: {e}"),
        })?;

        Ok(Self { inner, size })
    }

    /// Rasterization size in pixels
    pub fn size(&self) -> f32 {
        self.size
    }

    fn line_metrics(&self, text: &str) -> RenderResult<LineMetrics> {
        self.inner
            .horizontal_line_metrics(self.size)
            .ok_or_else(|| RenderError::TextRender {
                text: text.to_string(),
                reason: "font has no horizontal line metrics".to_string(),
            })
    }

    /// Rasterize one line of text into an RGBA surface
    ///
    /// The surface is exactly as wide as the summed glyph advances and as
    /// tall as the font's ascent-to-descent span. Glyph coverage becomes the
    /// alpha channel of `color`.
    pub(crate) fn rasterize_line(&self, text: &str, color: Color) -> RenderResult<RgbaImage> {
        let line = self.line_metrics(text)?;
        let glyphs: Vec<_> = text.chars().map(|ch| self.inner.rasterize(ch, self.size)).collect();

        let width = glyphs.iter().map(|(metrics, _)| metrics.advance_width).sum::<f32>().ceil();
        let height = (line.ascent - line.descent).ceil();
        if width < 1.0 || height < 1.0 {
            return Err(RenderError::TextRender {
                text: text.to_string(),
                reason: format!("degenerate surface {width}x{height}"),
            });
        }

        let (width, height) = (width as u32, height as u32);
        let mut surface = RgbaImage::new(width, height);
        let baseline = line.ascent.round() as i32;
        let mut pen = 0.0_f32;

        for (metrics, coverage) in &glyphs {
            let left = pen.round() as i32 + metrics.xmin;
            // fontdue's ymin is the offset of the glyph's bottom edge above the baseline
            let top = baseline - metrics.ymin - metrics.height as i32;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let value = coverage[row * metrics.width + col];
                    if value == 0 {
                        continue;
                    }
                    let x = left + col as i32;
                    let y = top + row as i32;
                    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                        continue;
                    }

                    let alpha = (u16::from(value) * u16::from(color.a) / 255) as u8;
                    let pixel = surface.get_pixel_mut(x as u32, y as u32);
                    let existing = pixel.0[3];
                    pixel.0 = [color.r, color.g, color.b, existing.max(alpha)];
                }
            }
            pen += metrics.advance_width;
        }

        Ok(surface)
    }
}
