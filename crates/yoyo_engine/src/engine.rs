//! Core engine implementation

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::{
    assets::ResourcePaths,
    audio::AudioBackend,
    core::config::{ConfigError, EngineConfig},
    debug::{DebugOverlay, OverlayStats},
    foundation::time::{FrameLimiter, Timer},
    graphics::{Graphics, GraphicsError},
    input::HostEvent,
    render::{Color, Font, Placement, RenderTarget, Texture},
};

/// Engine font, relative to the resource root
pub const ENGINE_FONT: &str = "fonts/Nunito-Bold.ttf";
/// Pixel size the engine font is rasterized at
pub const ENGINE_FONT_SIZE: f32 = 500.0;
/// Color of engine-drawn diagnostic text
pub const ENGINE_FONT_COLOR: Color = Color::YELLOW;

const STARTUP_SOUND: &str = "sfx/startup.mp3";
const SPLASH_LOGO: &str = "images/enginelogo.png";
const SPLASH_TITLE: &str = "yoyo engine";

/// Main engine struct
///
/// Owns the graphics context and the audio collaborator, and drives the
/// per-frame work: timing, overlay refresh, compositing and pacing. The
/// host owns the loop and feeds it [`HostEvent`]s.
pub struct Engine {
    graphics: Graphics,
    audio: Box<dyn AudioBackend>,
    config: EngineConfig,
    resources: ResourcePaths,
    font: Option<Font>,
    overlay: Option<DebugOverlay>,
    timer: Timer,
    limiter: FrameLimiter,
    running: bool,
    shut_down: bool,
}

impl Engine {
    /// Create a new engine instance
    ///
    /// Shows the splash screen unless `skip_intro` is set, so this blocks
    /// for `splash_millis`.
    pub fn new(
        config: EngineConfig,
        target: Box<dyn RenderTarget>,
        audio: Box<dyn AudioBackend>,
    ) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        if config.screen_width == 0 || config.screen_height == 0 {
            return Err(EngineError::Initialization(format!(
                "invalid display size {}x{}",
                config.screen_width, config.screen_height
            )));
        }
        config.validate()?;

        let resources = config
            .resource_root
            .clone()
            .map_or_else(ResourcePaths::discover, ResourcePaths::new);

        let mut graphics = Graphics::new(target).with_clear_color(config.clear_color());
        let viewport = graphics.viewport();
        if (viewport.width(), viewport.height()) != (config.screen_width, config.screen_height) {
            graphics.set_viewport(config.screen_width, config.screen_height);
        }

        let font = match Font::load(resources.resolve(ENGINE_FONT), ENGINE_FONT_SIZE) {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Engine font unavailable, engine text disabled: {}", e);
                None
            }
        };

        let overlay = if config.debug {
            log::debug!("Debug mode enabled");
            Self::install_overlay(&mut graphics, font.as_ref())
        } else {
            None
        };

        let mut audio = audio;
        audio.set_volume(config.volume);

        let mut engine = Self {
            graphics,
            audio,
            limiter: FrameLimiter::new(config.frame_cap),
            config,
            resources,
            font,
            overlay,
            timer: Timer::new(),
            running: true,
            shut_down: false,
        };

        if engine.config.skip_intro {
            log::info!("Skipping intro");
        } else {
            engine.run_splash();
        }
        engine.graphics.render_all();

        log::info!("Engine fully initialized");
        Ok(engine)
    }

    fn install_overlay(graphics: &mut Graphics, font: Option<&Font>) -> Option<DebugOverlay> {
        let Some(font) = font else {
            log::warn!("Debug overlay needs the engine font, skipping it");
            return None;
        };
        match DebugOverlay::install(graphics, |text| Texture::from_text(text, font, ENGINE_FONT_COLOR)) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::warn!("Failed to install debug overlay: {}", e);
                None
            }
        }
    }

    /// Startup sound, logo and title, held for `splash_millis`
    fn run_splash(&mut self) {
        self.audio.play_sound(&self.resources.resolve(STARTUP_SOUND), 0);

        // Creation failures are already logged; the splash goes on without them
        let logo = self.resources.resolve(SPLASH_LOGO);
        self.graphics
            .create_image(0, Placement::centered(0.5, 0.5, 0.35, 0.4), logo)
            .ok();
        if let Some(font) = &self.font {
            self.graphics
                .create_text(0, Placement::centered(0.5, 0.3, 0.3, 0.1), SPLASH_TITLE, font, Color::WHITE)
                .ok();
        }

        self.graphics.render_all();
        std::thread::sleep(Duration::from_millis(self.config.splash_millis));
        self.graphics.clear_all(false);
    }

    /// Run one frame: timing, overlay refresh, render, pacing
    pub fn frame(&mut self) {
        self.timer.update();

        if let (Some(overlay), Some(font)) = (self.overlay.as_mut(), self.font.as_ref()) {
            let stats = OverlayStats {
                fps: self.timer.sampled_fps(),
                render_objects: self.graphics.object_count(),
                audio_chunks: self.audio.chunk_count(),
            };
            overlay.update(&mut self.graphics, stats, |text| {
                Texture::from_text(text, font, ENGINE_FONT_COLOR)
            });
        }

        self.graphics.render_all();
        self.limiter.wait();
    }

    /// Handle an event from the host
    ///
    /// Returns the identifier of the button a click landed on.
    pub fn handle_event(&mut self, event: HostEvent) -> Option<i32> {
        match event {
            HostEvent::Click { x, y } => self.graphics.check_clicked(x, y),
            HostEvent::Resized { width, height } => {
                self.graphics.set_viewport(width, height);
                None
            }
            HostEvent::Quit => {
                self.quit();
                None
            }
        }
    }

    /// Whether the host loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Get the graphics context
    pub fn graphics(&self) -> &Graphics {
        &self.graphics
    }

    /// Get mutable access to the graphics context
    pub fn graphics_mut(&mut self) -> &mut Graphics {
        &mut self.graphics
    }

    /// Get the audio collaborator
    pub fn audio_mut(&mut self) -> &mut dyn AudioBackend {
        self.audio.as_mut()
    }

    /// Resolve a path relative to the resource root
    pub fn resource_path(&self, relative: &str) -> PathBuf {
        self.resources.resolve(relative)
    }

    /// The engine font, if it could be loaded
    pub fn engine_font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Release every render object, then shut audio down
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.shut_down {
            return;
        }
        log::info!("Shutting down engine...");
        let removed = self.graphics.clear_all(true);
        log::info!("Released {} render objects", removed);
        self.audio.shutdown();
        log::info!("Shut down audio");
        self.shut_down = true;
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.release();
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine could not start
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// Configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene operation failed
    #[error("Graphics error: {0}")]
    Graphics(#[from] GraphicsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PixelRect;
    use crate::scene::Callback;
    use crate::testing::{solid, write_png, RecordingAudio, RecordingTarget};
    use tempfile::tempdir;
    use std::cell::Cell;
    use std::rc::Rc;

    fn config(root: &std::path::Path) -> EngineConfig {
        EngineConfig::default()
            .with_resource_root(root)
            .with_skip_intro(true)
            .with_splash_millis(0)
    }

    #[test]
    fn test_zero_display_size_is_fatal() {
        let (target, _) = RecordingTarget::new(0, 0);
        let (audio, _) = RecordingAudio::new();
        let config = EngineConfig::default().with_screen_size(0, 720);

        let result = Engine::new(config, Box::new(target), Box::new(audio));
        assert!(matches!(result, Err(EngineError::Initialization(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (target, _) = RecordingTarget::new(1280, 720);
        let (audio, _) = RecordingAudio::new();
        let config = EngineConfig::default().with_frame_cap(0);

        let result = Engine::new(config, Box::new(target), Box::new(audio));
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_startup_without_font_skips_overlay() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let (target, frames) = RecordingTarget::new(1280, 720);
        let (audio, sounds) = RecordingAudio::new();

        let engine = Engine::new(config(&root).with_debug(true), Box::new(target), Box::new(audio)).unwrap();

        assert!(engine.engine_font().is_none());
        assert_eq!(engine.graphics().object_count(), 0);
        assert_eq!(sounds.borrow().volume, Some(128));
        assert!(sounds.borrow().played.is_empty());
        // Final frame after initialization
        assert_eq!(frames.borrow().frames.len(), 1);
    }

    #[test]
    fn test_splash_shows_logo_then_clears() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_png(&root.join(SPLASH_LOGO), 16, 16, Color::WHITE);
        let (target, frames) = RecordingTarget::new(1280, 720);
        let (audio, sounds) = RecordingAudio::new();

        let engine = Engine::new(config(&root).with_skip_intro(false), Box::new(target), Box::new(audio)).unwrap();

        assert_eq!(sounds.borrow().played, vec![root.join(STARTUP_SOUND)]);
        let frames = frames.borrow();
        assert_eq!(frames.frames.len(), 2);
        assert_eq!(frames.frames[0], vec![PixelRect::new(416, 216, 448, 288)]);
        assert!(frames.frames[1].is_empty());
        assert_eq!(engine.graphics().object_count(), 0);
    }

    #[test]
    fn test_config_size_overrides_target_size() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let (target, frames) = RecordingTarget::new(640, 480);
        let (audio, _) = RecordingAudio::new();

        let engine = Engine::new(config(&root), Box::new(target), Box::new(audio)).unwrap();
        assert_eq!(engine.graphics().viewport().width(), 1280);
        assert_eq!(frames.borrow().resizes, vec![(1280, 720)]);
    }

    #[test]
    fn test_handle_events() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let (target, _) = RecordingTarget::new(1280, 720);
        let (audio, _) = RecordingAudio::new();
        let mut engine = Engine::new(config(&root), Box::new(target), Box::new(audio)).unwrap();

        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let play = engine
            .graphics_mut()
            .add_button(
                1,
                Placement::centered(0.5, 0.5, 0.2, 0.1),
                solid(Color::WHITE),
                Callback::new("play", move |_, _| counter.set(counter.get() + 1)),
            )
            .unwrap();

        assert_eq!(engine.handle_event(HostEvent::Click { x: 640, y: 360 }), Some(play));
        assert_eq!(engine.handle_event(HostEvent::Click { x: 0, y: 0 }), None);
        assert_eq!(clicks.get(), 1);

        engine.handle_event(HostEvent::Resized { width: 1920, height: 1080 });
        assert_eq!(
            engine.graphics().get(play).unwrap().rect(),
            PixelRect::new(768, 486, 384, 108)
        );

        assert!(engine.is_running());
        engine.handle_event(HostEvent::Quit);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_frame_renders_scene() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let (target, frames) = RecordingTarget::new(1280, 720);
        let (audio, _) = RecordingAudio::new();
        let mut engine = Engine::new(config(&root), Box::new(target), Box::new(audio)).unwrap();
        engine
            .graphics_mut()
            .add_render_object(
                0,
                crate::scene::RenderKind::Image,
                0,
                Placement::new(0.0, 0.0, 1.0, 1.0),
                solid(Color::BLACK),
            )
            .unwrap();

        engine.frame();
        engine.frame();

        let frames = frames.borrow();
        assert_eq!(frames.frames.len(), 3);
        assert_eq!(frames.frames[2], vec![PixelRect::new(0, 0, 1280, 720)]);
    }

    #[test]
    fn test_shutdown_runs_once() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let (target, _) = RecordingTarget::new(1280, 720);
        let (audio, sounds) = RecordingAudio::new();
        let engine = Engine::new(config(&root), Box::new(target), Box::new(audio)).unwrap();

        engine.shutdown();
        assert_eq!(sounds.borrow().shutdowns, 1);
    }

    #[test]
    fn test_drop_shuts_down() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let (target, _) = RecordingTarget::new(1280, 720);
        let (audio, sounds) = RecordingAudio::new();
        {
            let _engine = Engine::new(config(&root), Box::new(target), Box::new(audio)).unwrap();
        }
        assert_eq!(sounds.borrow().shutdowns, 1);
    }
}
