//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types for normalized layout
//! - Frame timing and pacing
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
