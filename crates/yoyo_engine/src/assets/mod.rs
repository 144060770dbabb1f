//! Asset location

pub mod paths;

pub use paths::ResourcePaths;
