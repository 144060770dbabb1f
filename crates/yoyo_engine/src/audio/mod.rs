//! Audio collaborator interface
//!
//! The engine only issues a handful of calls to the audio layer: set the
//! master volume, play a sound effect, report how many chunks are loaded
//! and shut down. Mixing and decoding live in the host's backend.

use std::path::{Path, PathBuf};

/// Audio backend trait for platform abstraction
///
/// Not `Send`; the engine drives audio from its single thread.
pub trait AudioBackend {
    /// Set the master volume (0..=128)
    fn set_volume(&mut self, volume: u8);

    /// Play a sound effect file
    ///
    /// # Arguments
    ///
    /// * `path` - Sound file, already resolved against the resource root
    /// * `loops` - Extra repetitions; `0` plays once, `-1` loops forever
    fn play_sound(&mut self, path: &Path, loops: i32);

    /// Number of sound chunks currently loaded
    fn chunk_count(&self) -> usize;

    /// Release every sound and close the device
    fn shutdown(&mut self);
}

/// Backend that plays nothing and records what it was asked to do
#[derive(Debug, Default)]
pub struct NullAudio {
    volume: u8,
    played: Vec<PathBuf>,
    shut_down: bool,
}

impl NullAudio {
    /// Create a silent backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Last volume set
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Every sound requested so far, oldest first
    pub fn played(&self) -> &[PathBuf] {
        &self.played
    }

    /// Whether `shutdown` has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl AudioBackend for NullAudio {
    fn set_volume(&mut self, volume: u8) {
        log::debug!("NullAudio: volume set to {}", volume);
        self.volume = volume;
    }

    fn play_sound(&mut self, path: &Path, loops: i32) {
        log::debug!("NullAudio: play {:?} (loops: {})", path, loops);
        if !self.played.iter().any(|played| played == path) {
            self.played.push(path.to_path_buf());
        }
    }

    fn chunk_count(&self) -> usize {
        self.played.len()
    }

    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        log::debug!("NullAudio: shutting down, releasing {} chunks", self.played.len());
        self.played.clear();
        self.shut_down = true;
    }
}
