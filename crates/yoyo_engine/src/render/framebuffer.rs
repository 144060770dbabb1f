//! Software render target
//!
//! A double-buffered RGBA framebuffer. Draws are nearest-neighbour scaled,
//! alpha blended and clipped to the surface; `present` copies the back buffer
//! to the front buffer, which is what [`Framebuffer::pixel`] and
//! [`RenderTarget::capture`] read.

use std::path::Path;

use image::RgbaImage;

use super::{Color, PixelRect, RenderError, RenderResult, RenderTarget, Texture};

/// CPU framebuffer with a back and a front buffer
pub struct Framebuffer {
    width: u32,
    height: u32,
    back: Vec<Color>,
    front: Vec<Color>,
    frames_presented: u64,
}

impl Framebuffer {
    /// Create a framebuffer of the given size, cleared to transparent
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            back: vec![Color::TRANSPARENT; len],
            front: vec![Color::TRANSPARENT; len],
            frames_presented: 0,
        }
    }

    /// Pixel of the last presented frame
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.front[self.index(x, y)])
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Last presented frame as an image
    pub fn to_image(&self) -> RgbaImage {
        let bytes: &[u8] = bytemuck::cast_slice(&self.front);
        RgbaImage::from_raw(self.width, self.height, bytes.to_vec())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Save the last presented frame as a PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_image()
            .save(path)
            .map_err(|e| RenderError::Present(format!("failed to save {}: {}", path.display(), e)))?;
        log::info!("Saved frame to {}", path.display());
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl RenderTarget for Framebuffer {
    fn begin_frame(&mut self, clear_color: Color) {
        self.back.fill(clear_color);
    }

    fn draw_texture(&mut self, texture: &Texture, rect: PixelRect) -> RenderResult<()> {
        let (tex_w, tex_h) = texture.dimensions();
        if tex_w == 0 || tex_h == 0 {
            return Err(RenderError::Draw("texture has no pixels".to_string()));
        }
        if rect.is_empty() {
            return Err(RenderError::Draw(format!(
                "destination {}x{} is empty",
                rect.w, rect.h
            )));
        }

        // Clip destination to the surface
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.x.saturating_add(rect.w).min(self.width as i32);
        let y1 = rect.y.saturating_add(rect.h).min(self.height as i32);

        for y in y0..y1 {
            let v = (i64::from(y - rect.y) * i64::from(tex_h) / i64::from(rect.h)) as u32;
            for x in x0..x1 {
                let u = (i64::from(x - rect.x) * i64::from(tex_w) / i64::from(rect.w)) as u32;
                let index = self.index(x as u32, y as u32);
                self.back[index] = texture.pixel(u, v).over(self.back[index]);
            }
        }
        Ok(())
    }

    fn present(&mut self) -> RenderResult<()> {
        self.front.copy_from_slice(&self.back);
        self.frames_presented += 1;
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!("Framebuffer resized {}x{} -> {}x{}", self.width, self.height, width, height);
        *self = Self {
            frames_presented: self.frames_presented,
            ..Self::new(width, height)
        };
    }

    fn capture(&self) -> Option<RgbaImage> {
        Some(self.to_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_draw_is_only_visible_after_present() {
        let mut fb = Framebuffer::new(4, 4);
        fb.begin_frame(Color::BLACK);
        fb.draw_texture(&Texture::solid(1, 1, Color::WHITE), PixelRect::new(0, 0, 2, 2)).unwrap();
        assert_eq!(fb.pixel(0, 0), Some(Color::TRANSPARENT));

        fb.present().unwrap();
        assert_eq!(fb.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(fb.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(fb.pixel(2, 2), Some(Color::BLACK));
        assert_eq!(fb.pixel(4, 0), None);
        assert_eq!(fb.frames_presented(), 1);
    }

    #[test]
    fn test_draw_clips_off_screen_rect() {
        let mut fb = Framebuffer::new(4, 4);
        fb.begin_frame(Color::BLACK);
        fb.draw_texture(&Texture::solid(2, 2, Color::WHITE), PixelRect::new(-2, -2, 4, 4)).unwrap();
        fb.present().unwrap();

        assert_eq!(fb.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(fb.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(fb.pixel(2, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_nearest_neighbour_scaling() {
        let mut texture = RgbaImage::new(2, 1);
        texture.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        texture.put_pixel(1, 0, image::Rgba([0, 0, 255, 255]));

        let mut fb = Framebuffer::new(4, 1);
        fb.begin_frame(Color::BLACK);
        fb.draw_texture(&Texture::from_rgba(texture), PixelRect::new(0, 0, 4, 1)).unwrap();
        fb.present().unwrap();

        assert_eq!(fb.pixel(1, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(fb.pixel(2, 0), Some(Color::rgb(0, 0, 255)));
    }

    #[test]
    fn test_empty_destination_is_an_error() {
        let mut fb = Framebuffer::new(4, 4);
        let result = fb.draw_texture(&Texture::solid(1, 1, Color::WHITE), PixelRect::new(0, 0, 0, 3));
        assert!(matches!(result, Err(RenderError::Draw(_))));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut fb = Framebuffer::new(4, 4);
        fb.present().unwrap();
        fb.resize(8, 2);
        assert_eq!(fb.size(), (8, 2));
        assert_eq!(fb.pixel(7, 1), Some(Color::TRANSPARENT));
        assert_eq!(fb.frames_presented(), 1);
    }

    #[test]
    fn test_capture_and_save() {
        let mut fb = Framebuffer::new(2, 2);
        fb.begin_frame(Color::rgb(1, 2, 3));
        fb.present().unwrap();

        let image = fb.capture().unwrap();
        assert_eq!(image.get_pixel(1, 1).0, [1, 2, 3, 255]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        fb.save_png(&path).unwrap();
        assert!(path.exists());
    }
}
