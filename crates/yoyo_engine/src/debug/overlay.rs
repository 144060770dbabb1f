//! Debug overlay
//!
//! Three text counters in the top-left corner: frames per second, live
//! render objects and loaded audio chunks. They use reserved identifiers,
//! so scene clears leave them alone, and sit above everything the game
//! draws. A counter's texture is only rebuilt when its value changes.

use crate::render::{Placement, RenderError, Texture};
use crate::scene::RenderKind;
use crate::{Graphics, GraphicsError};

/// Reserved identifier of the fps counter
pub const FPS_COUNTER_ID: i32 = -1;
/// Reserved identifier of the render object counter
pub const OBJECT_COUNTER_ID: i32 = -2;
/// Reserved identifier of the audio chunk counter
pub const AUDIO_COUNTER_ID: i32 = -3;

/// One overlay line
#[derive(Debug, Clone, Copy)]
struct Counter {
    identifier: i32,
    depth: i32,
    label: &'static str,
    row: f32,
}

impl Counter {
    fn placement(&self) -> Placement {
        Placement::new(0.0, self.row, 0.15, 0.1)
    }

    fn text(&self, value: u64) -> String {
        format!("{}: {}", self.label, value)
    }
}

const COUNTERS: [Counter; 3] = [
    Counter {
        identifier: FPS_COUNTER_ID,
        depth: 999,
        label: "fps",
        row: 0.0,
    },
    Counter {
        identifier: OBJECT_COUNTER_ID,
        depth: 998,
        label: "renderObjects",
        row: 0.1,
    },
    Counter {
        identifier: AUDIO_COUNTER_ID,
        depth: 997,
        label: "audio chunks",
        row: 0.2,
    },
];

/// Values shown by the overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayStats {
    /// Frames rendered in the last sample window
    pub fps: u32,
    /// Live render objects
    pub render_objects: usize,
    /// Loaded audio chunks
    pub audio_chunks: usize,
}

impl OverlayStats {
    fn values(&self) -> [u64; 3] {
        [
            u64::from(self.fps),
            self.render_objects as u64,
            self.audio_chunks as u64,
        ]
    }
}

/// Keeps the counter objects in sync with engine statistics
#[derive(Debug, Default)]
pub struct DebugOverlay {
    shown: [u64; 3],
}

impl DebugOverlay {
    /// Add the counters to the scene, all reading zero
    ///
    /// `render_label` turns a counter line into a texture. On failure the
    /// counters added so far are removed again, leaving the scene as it was.
    pub fn install<F>(graphics: &mut Graphics, render_label: F) -> Result<Self, GraphicsError>
    where
        F: Fn(&str) -> Result<Texture, RenderError>,
    {
        for (installed, counter) in COUNTERS.iter().enumerate() {
            let added = render_label(&counter.text(0))
                .map_err(GraphicsError::from)
                .and_then(|texture| {
                    graphics.add_render_object(
                        counter.identifier,
                        RenderKind::Text,
                        counter.depth,
                        counter.placement(),
                        texture,
                    )
                });

            if let Err(e) = added {
                for counter in &COUNTERS[..installed] {
                    graphics.remove_render_object(counter.identifier);
                }
                return Err(e);
            }
        }
        log::debug!("Debug overlay installed");
        Ok(Self::default())
    }

    /// Refresh counters whose value changed
    ///
    /// A counter whose object has been removed from the scene is skipped.
    /// Returns the number of counters rebuilt.
    pub fn update<F>(&mut self, graphics: &mut Graphics, stats: OverlayStats, render_label: F) -> usize
    where
        F: Fn(&str) -> Result<Texture, RenderError>,
    {
        let mut refreshed = 0;
        for ((counter, shown), value) in COUNTERS.iter().zip(self.shown.iter_mut()).zip(stats.values()) {
            if *shown == value || graphics.get(counter.identifier).is_none() {
                continue;
            }

            let texture = match render_label(&counter.text(value)) {
                Ok(texture) => texture,
                Err(e) => {
                    log::warn!("Failed to refresh {} counter: {}", counter.label, e);
                    continue;
                }
            };

            graphics.remove_render_object(counter.identifier);
            if let Err(e) = graphics.add_render_object(
                counter.identifier,
                RenderKind::Text,
                counter.depth,
                counter.placement(),
                texture,
            ) {
                log::warn!("Failed to re-add {} counter: {}", counter.label, e);
                continue;
            }

            *shown = value;
            refreshed += 1;
        }
        refreshed
    }
}
