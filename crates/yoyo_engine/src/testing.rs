//! Shared test fixtures

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::audio::AudioBackend;
use crate::render::{Color, Font, PixelRect, RenderError, RenderTarget, Texture};

/// Write a solid-colour PNG to `path`, creating parent directories
pub fn write_png(path: &Path, width: u32, height: u32, color: Color) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba(color.to_array()));
    image.save(path).unwrap();
}

/// Bundled DejaVu Sans, rasterized at `size` pixels
pub fn test_font(size: f32) -> Font {
    Font::from_bytes(include_bytes!("../tests/fixtures/DejaVuSans.ttf"), size).unwrap()
}

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger that keeps records per test thread
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Start capturing log records emitted on the current thread
pub fn capture_logs() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Messages captured on the current thread at `level`
pub fn captured(level: log::Level) -> Vec<String> {
    CAPTURED.with(|captured| {
        captured
            .borrow()
            .iter()
            .filter(|(record_level, _)| *record_level == level)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

/// Small opaque texture
pub fn solid(color: Color) -> Texture {
    Texture::solid(4, 4, color)
}

/// What a [`RecordingTarget`] saw
#[derive(Debug, Default)]
pub struct Recording {
    /// Rects drawn since the last `begin_frame`
    pub current: Vec<PixelRect>,
    /// Rects of every presented frame
    pub frames: Vec<Vec<PixelRect>>,
    /// Screen sizes passed to `resize`
    pub resizes: Vec<(u32, u32)>,
}

/// Render target that records draw calls instead of producing pixels
pub struct RecordingTarget {
    log: Rc<RefCell<Recording>>,
    size: (u32, u32),
}

impl RecordingTarget {
    /// Create a target and the shared log it writes to
    pub fn new(width: u32, height: u32) -> (Self, Rc<RefCell<Recording>>) {
        let log = Rc::new(RefCell::new(Recording::default()));
        (
            Self {
                log: Rc::clone(&log),
                size: (width, height),
            },
            log,
        )
    }
}

impl RenderTarget for RecordingTarget {
    fn begin_frame(&mut self, _clear_color: Color) {
        self.log.borrow_mut().current.clear();
    }

    fn draw_texture(&mut self, _texture: &Texture, rect: PixelRect) -> Result<(), RenderError> {
        if rect.is_empty() {
            return Err(RenderError::Draw(format!("empty destination {rect:?}")));
        }
        self.log.borrow_mut().current.push(rect);
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let mut log = self.log.borrow_mut();
        let frame = std::mem::take(&mut log.current);
        log.frames.push(frame);
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.log.borrow_mut().resizes.push((width, height));
    }
}

/// What a [`RecordingAudio`] was asked to do
#[derive(Debug, Default)]
pub struct AudioLog {
    /// Last volume set
    pub volume: Option<u8>,
    /// Sounds played, in order
    pub played: Vec<PathBuf>,
    /// Number of `shutdown` calls
    pub shutdowns: u32,
}

/// Audio backend that records calls into a shared log
pub struct RecordingAudio {
    log: Rc<RefCell<AudioLog>>,
}

impl RecordingAudio {
    /// Create a backend and the shared log it writes to
    pub fn new() -> (Self, Rc<RefCell<AudioLog>>) {
        let log = Rc::new(RefCell::new(AudioLog::default()));
        (Self { log: Rc::clone(&log) }, log)
    }
}

impl AudioBackend for RecordingAudio {
    fn set_volume(&mut self, volume: u8) {
        self.log.borrow_mut().volume = Some(volume);
    }

    fn play_sound(&mut self, path: &Path, _loops: i32) {
        self.log.borrow_mut().played.push(path.to_path_buf());
    }

    fn chunk_count(&self) -> usize {
        self.log.borrow().played.len()
    }

    fn shutdown(&mut self) {
        self.log.borrow_mut().shutdowns += 1;
    }
}
