//! Scene management
//!
//! The retained scene: render objects ordered by depth, and the buttons
//! linked to some of them.
//!
//! Architecture:
//! - RenderObject: one drawable unit, owning its texture
//! - RenderObjectStore: depth-ordered storage keyed by identifier
//! - ButtonRegistry: callbacks attached to Button-kind objects

pub mod object;
pub mod store;
pub mod buttons;

pub use object::{RenderKind, RenderObject};
pub use store::RenderObjectStore;
pub use buttons::{ButtonRegistry, Callback, CallbackHandler, CallbackParam, CallbackParams, CALLBACK_ARITY};
