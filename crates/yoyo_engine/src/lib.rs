//! # Yoyo Engine
//!
//! A retained-mode 2D engine for menu-driven games. The engine owns a live
//! collection of render objects (text labels, images, clickable buttons),
//! draws them every frame in depth order, maps normalized layout coordinates
//! onto pixel rectangles for the current viewport, and routes pointer clicks
//! to button callbacks.
//!
//! ## Features
//!
//! - **Render Object Store**: depth-ordered, identifier-keyed scene storage
//! - **Buttons**: fixed-arity callback descriptors with first-hit dispatch
//! - **Software Compositing**: RGBA framebuffer backend with alpha blending
//! - **Text and Images**: `fontdue` rasterization and `image` decoding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yoyo_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     yoyo_engine::foundation::logging::init();
//!
//!     let config = EngineConfig::default().with_skip_intro(true);
//!     let target = Framebuffer::new(config.screen_width, config.screen_height);
//!     let mut engine = Engine::new(config, Box::new(target), Box::new(NullAudio::default()))?;
//!
//!     let background = engine.resource_path("images/people720.png");
//!     engine
//!         .graphics_mut()
//!         .create_image(0, Placement::centered(0.5, 0.5, 1.0, 1.0), &background)?;
//!
//!     while engine.is_running() {
//!         engine.handle_event(HostEvent::Quit);
//!         engine.frame();
//!     }
//!
//!     engine.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod assets;
pub mod render;
pub mod scene;
pub mod input;
pub mod audio;
pub mod debug;

mod graphics;
mod engine;

#[cfg(test)]
mod testing;

pub use graphics::{Graphics, GraphicsError};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineError,
        Graphics, GraphicsError,
        audio::{AudioBackend, NullAudio},
        core::config::{EngineConfig, WindowFlags},
        input::HostEvent,
        render::{
            Color, Compositor, Font, Framebuffer, PixelRect, Placement, RenderError,
            RenderTarget, Texture, Viewport,
        },
        scene::{
            ButtonRegistry, Callback, CallbackParam, CallbackParams, RenderKind, RenderObject,
            RenderObjectStore,
        },
    };
}
