//! Debug module for on-screen diagnostics

pub mod overlay;

pub use overlay::{DebugOverlay, OverlayStats};
