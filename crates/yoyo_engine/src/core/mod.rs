//! # Core Engine Module
//!
//! Shared configuration for the engine and its host.

pub mod config;

// Re-export commonly used config types
pub use config::{EngineConfig, WindowFlags};
pub use crate::config::{Config, ConfigError};
