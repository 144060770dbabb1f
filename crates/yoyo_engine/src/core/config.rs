//! # Engine Configuration
//!
//! Startup settings the host hands to the engine: display size, window mode,
//! volume, frame pacing and debug/splash switches. Loadable from TOML or RON
//! through the [`Config`] trait.

use std::path::PathBuf;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::render::Color;

bitflags! {
    /// Window mode bits as understood by the window collaborator
    ///
    /// An empty set means a plain window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        /// Exclusive fullscreen
        const FULLSCREEN = 1;
        /// Borderless window
        const BORDERLESS = 16;
        /// Start maximized
        const MAXIMIZED = 128;
    }
}

/// Highest volume the audio collaborator accepts
pub const MAX_VOLUME: u8 = 128;

/// Frame cap value meaning "no cap, let presentation pace the loop"
pub const UNCAPPED: i32 = -1;

/// # Engine Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial screen width in pixels
    pub screen_width: u32,
    /// Initial screen height in pixels
    pub screen_height: u32,
    /// Raw window mode bits, see [`WindowFlags`]
    pub window_mode: u32,
    /// Master volume (0..=128)
    pub volume: u8,
    /// Frames per second cap, `-1` for uncapped
    pub frame_cap: i32,
    /// Show the diagnostic overlay and log at debug level
    pub debug: bool,
    /// Skip the startup splash screen
    pub skip_intro: bool,
    /// How long the splash screen stays up
    pub splash_millis: u64,
    /// Back buffer clear color (RGBA)
    pub clear_color: [u8; 4],
    /// Resource directory; discovered automatically when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_root: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            window_mode: 0,
            volume: MAX_VOLUME,
            frame_cap: UNCAPPED,
            debug: false,
            skip_intro: false,
            splash_millis: 2550,
            clear_color: [0, 0, 0, 255],
            resource_root: None,
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Set the initial screen size
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable or disable the splash screen
    pub fn with_skip_intro(mut self, skip_intro: bool) -> Self {
        self.skip_intro = skip_intro;
        self
    }

    /// Set the splash screen duration
    pub fn with_splash_millis(mut self, millis: u64) -> Self {
        self.splash_millis = millis;
        self
    }

    /// Set the resource directory
    pub fn with_resource_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.resource_root = Some(root.into());
        self
    }

    /// Set the frame cap
    pub fn with_frame_cap(mut self, frame_cap: i32) -> Self {
        self.frame_cap = frame_cap;
        self
    }

    /// Window mode as typed flags; unknown bits are dropped
    pub fn window_flags(&self) -> WindowFlags {
        WindowFlags::from_bits_truncate(self.window_mode)
    }

    /// Back buffer clear color
    pub fn clear_color(&self) -> Color {
        let [r, g, b, a] = self.clear_color;
        Color::rgba(r, g, b, a)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "screen size {}x{} must be non-zero",
                self.screen_width, self.screen_height
            )));
        }
        if self.volume > MAX_VOLUME {
            return Err(ConfigError::Invalid(format!(
                "volume {} exceeds {}",
                self.volume, MAX_VOLUME
            )));
        }
        if self.frame_cap != UNCAPPED && self.frame_cap <= 0 {
            return Err(ConfigError::Invalid(format!(
                "frame cap {} must be positive or {}",
                self.frame_cap, UNCAPPED
            )));
        }
        Ok(())
    }
}
