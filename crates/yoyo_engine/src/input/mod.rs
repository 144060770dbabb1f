//! Input handling
//!
//! The engine never polls hardware. The host translates its window events
//! into [`HostEvent`]s and hands them to [`crate::Engine::handle_event`].

pub mod collision;

/// Events delivered by the host's window/input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Pointer click at a screen position (pixels, top-left origin)
    Click {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
    },

    /// Window surface was resized
    Resized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },

    /// Quit requested
    Quit,
}
