//! Resource path resolution
//!
//! Assets (fonts, images, sounds) are addressed by paths relative to a
//! resource root such as `images/enginelogo.png`. The root is either given
//! explicitly or found by probing the usual locations relative to the
//! working directory and the executable.

use std::path::{Path, PathBuf};

/// Name of the resource directory
const RESOURCE_DIR: &str = "resources";

/// Resolves relative asset paths against a resource root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    root: PathBuf,
}

impl ResourcePaths {
    /// Use an explicit resource root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the resource root by checking multiple common locations
    ///
    /// Tries `resources/` in the working directory, then `../resources/`,
    /// then `<exe dir>/../../resources/` (the layout of a binary under
    /// `target/<profile>/`). Falls back to `resources/` when none exist.
    pub fn discover() -> Self {
        let found = Self::candidates().into_iter().find(|candidate| candidate.is_dir());
        match found {
            Some(root) => {
                log::info!("Using resource directory {:?}", root);
                Self { root }
            }
            None => {
                log::warn!("No resource directory found, falling back to {:?}", RESOURCE_DIR);
                Self::new(RESOURCE_DIR)
            }
        }
    }

    fn candidates() -> Vec<PathBuf> {
        let mut candidates = vec![
            PathBuf::from(RESOURCE_DIR),
            Path::new("..").join(RESOURCE_DIR),
        ];
        if let Some(exe_dir) = std::env::current_exe().ok().as_deref().and_then(Path::parent) {
            candidates.push(exe_dir.join("..").join("..").join(RESOURCE_DIR));
        }
        candidates
    }

    /// Resolve a path relative to the resource root
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// The resource root
    pub fn root(&self) -> &Path {
        &self.root
    }
}
