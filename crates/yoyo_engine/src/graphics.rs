//! Graphics context
//!
//! Owns the viewport, the render object store, the button registry and the
//! render target, and exposes the scene-building entry points hosts and
//! button callbacks use.

use std::path::Path;

use thiserror::Error;

use crate::render::{Color, Compositor, Font, Placement, RenderError, RenderTarget, Texture, Viewport};
use crate::scene::{ButtonRegistry, Callback, RenderKind, RenderObject, RenderObjectStore};

/// Errors from scene-building operations
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// Texture could not be built
    #[error("Asset error: {0}")]
    Asset(#[from] RenderError),

    /// Identifier is already live in the store
    #[error("Render object {0} already exists")]
    DuplicateIdentifier(i32),

    /// Identifier is not live in the store
    #[error("No render object with identifier {0}")]
    UnknownIdentifier(i32),

    /// Callbacks may only be attached to Button-kind objects
    #[error("Render object {0} is not a button")]
    NotAButton(i32),

    /// Every non-negative identifier is in use
    #[error("No free render object identifiers")]
    IdentifiersExhausted,
}

/// The retained-mode scene and the surface it is drawn on
pub struct Graphics {
    viewport: Viewport,
    store: RenderObjectStore,
    buttons: ButtonRegistry,
    compositor: Compositor,
    target: Box<dyn RenderTarget>,
    next_identifier: i32,
}

impl Graphics {
    /// Create a context drawing onto `target`
    ///
    /// The viewport starts at the target's current size.
    pub fn new(target: Box<dyn RenderTarget>) -> Self {
        let (width, height) = target.size();
        log::info!("Graphics context created ({}x{})", width, height);
        Self {
            viewport: Viewport::new(width, height),
            store: RenderObjectStore::new(),
            buttons: ButtonRegistry::new(),
            compositor: Compositor::default(),
            target,
            next_identifier: 0,
        }
    }

    /// Set the back buffer clear color (builder pattern)
    pub fn with_clear_color(mut self, clear_color: Color) -> Self {
        self.compositor = Compositor::new(clear_color);
        self
    }

    /// Create a text label
    ///
    /// Returns the new object's identifier. On failure the error is logged
    /// and nothing is added.
    pub fn create_text(
        &mut self,
        depth: i32,
        placement: Placement,
        text: &str,
        font: &Font,
        color: Color,
    ) -> Result<i32, GraphicsError> {
        let result = Texture::from_text(text, font, color)
            .map_err(GraphicsError::from)
            .and_then(|texture| self.insert_new(RenderKind::Text, depth, placement, texture));
        if let Err(e) = &result {
            log::error!("Failed to create text '{}': {}", text, e);
        }
        result
    }

    /// Create an image from a file
    pub fn create_image(
        &mut self,
        depth: i32,
        placement: Placement,
        path: impl AsRef<Path>,
    ) -> Result<i32, GraphicsError> {
        let path = path.as_ref();
        let result = Texture::from_image(path)
            .map_err(GraphicsError::from)
            .and_then(|texture| self.insert_new(RenderKind::Image, depth, placement, texture));
        if let Err(e) = &result {
            log::error!("Failed to create image {:?}: {}", path, e);
        }
        result
    }

    /// Create a clickable button with a text label
    ///
    /// The label is centred over `background` when one is given.
    pub fn create_button(
        &mut self,
        depth: i32,
        placement: Placement,
        label: &str,
        font: &Font,
        color: Color,
        background: Option<&Path>,
        callback: Callback,
    ) -> Result<i32, GraphicsError> {
        let face = Self::button_face(label, font, color, background);
        let result = face.and_then(|texture| self.add_button(depth, placement, texture, callback));
        if let Err(e) = &result {
            log::error!("Failed to create button '{}': {}", label, e);
        }
        result
    }

    fn button_face(
        label: &str,
        font: &Font,
        color: Color,
        background: Option<&Path>,
    ) -> Result<Texture, GraphicsError> {
        let label = Texture::from_text(label, font, color)?;
        let background = background.map(Texture::from_image).transpose()?;
        Ok(Texture::compose_button(background, label))
    }

    /// Add a button from a prepared face texture
    pub fn add_button(
        &mut self,
        depth: i32,
        placement: Placement,
        texture: Texture,
        callback: Callback,
    ) -> Result<i32, GraphicsError> {
        let identifier = self.insert_new(RenderKind::Button, depth, placement, texture)?;
        self.buttons.register(identifier, callback, &self.store)?;
        Ok(identifier)
    }

    /// Insert an object under a caller-chosen identifier
    ///
    /// Used for reserved (negative) identifiers such as the debug overlay.
    pub fn add_render_object(
        &mut self,
        identifier: i32,
        kind: RenderKind,
        depth: i32,
        placement: Placement,
        texture: Texture,
    ) -> Result<(), GraphicsError> {
        let result = self.store.add(identifier, kind, depth, placement, texture, &self.viewport);
        if let Err(e) = &result {
            log::warn!("Failed to add render object {}: {}", identifier, e);
        }
        result
    }

    /// Attach a callback to an existing Button-kind object
    pub fn register_button(&mut self, identifier: i32, callback: Callback) -> Result<(), GraphicsError> {
        let action = callback.action().to_string();
        let result = self.buttons.register(identifier, callback, &self.store);
        if let Err(e) = &result {
            log::warn!("Failed to register button {} -> '{}': {}", identifier, action, e);
        }
        result
    }

    /// Remove an object and any callback attached to it
    ///
    /// Unknown identifiers are a no-op.
    pub fn remove_render_object(&mut self, identifier: i32) -> Option<RenderObject> {
        self.buttons.unregister(identifier);
        let removed = self.store.remove(identifier);
        if removed.is_some() {
            log::debug!("Removed render object {}", identifier);
        }
        removed
    }

    /// Detach a button's callback; the object stays visible
    pub fn remove_button(&mut self, identifier: i32) -> Option<Callback> {
        self.buttons.unregister(identifier)
    }

    /// Remove non-reserved objects, or everything when `include_reserved`
    ///
    /// Callbacks of removed buttons go with them.
    pub fn clear_all(&mut self, include_reserved: bool) -> usize {
        let removed = self.store.clear(include_reserved);
        let dropped = self.buttons.retain_live(&self.store);
        log::debug!(
            "Cleared {} render objects ({} buttons), reserved included: {}",
            removed,
            dropped,
            include_reserved
        );
        removed
    }

    /// Draw the whole scene and present it
    pub fn render_all(&mut self) {
        self.compositor.render_all(&self.store, self.target.as_mut());
    }

    /// Dispatch a click to the topmost button under the point
    ///
    /// The callback runs with this context, so it may rebuild the scene.
    /// Returns the identifier of the button that was hit.
    pub fn check_clicked(&mut self, x: i32, y: i32) -> Option<i32> {
        let identifier = self.buttons.hit_test(&self.store, x, y)?;
        let callback = self.buttons.callback(identifier)?.clone();

        log::debug!("Button {} clicked at ({}, {}) -> '{}'", identifier, x, y, callback.action());
        callback.invoke(self);
        Some(identifier)
    }

    /// Apply a new screen size and re-derive every rect
    ///
    /// A zero dimension (minimized window) is ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring viewport resize to {}x{}", width, height);
            return;
        }
        log::info!("Viewport resized to {}x{}", width, height);
        self.viewport.resize(width, height);
        self.target.resize(width, height);
        self.store.relayout(&self.viewport);
    }

    /// Look up an object
    pub fn get(&self, identifier: i32) -> Option<&RenderObject> {
        self.store.get(identifier)
    }

    /// Number of live render objects
    pub fn object_count(&self) -> usize {
        self.store.len()
    }

    /// The render object store
    pub fn store(&self) -> &RenderObjectStore {
        &self.store
    }

    /// The button registry
    pub fn buttons(&self) -> &ButtonRegistry {
        &self.buttons
    }

    /// Current viewport
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The render target
    pub fn target(&self) -> &dyn RenderTarget {
        self.target.as_ref()
    }

    fn insert_new(
        &mut self,
        kind: RenderKind,
        depth: i32,
        placement: Placement,
        texture: Texture,
    ) -> Result<i32, GraphicsError> {
        let identifier = self.allocate_identifier()?;
        self.store.add(identifier, kind, depth, placement, texture, &self.viewport)?;
        Ok(identifier)
    }

    /// Next free non-negative identifier, wrapping at `i32::MAX`
    fn allocate_identifier(&mut self) -> Result<i32, GraphicsError> {
        let start = self.next_identifier;
        let mut candidate = start;
        loop {
            let next = candidate.checked_add(1).unwrap_or(0);
            if !self.store.contains(candidate) {
                self.next_identifier = next;
                return Ok(candidate);
            }
            candidate = next;
            if candidate == start {
                return Err(GraphicsError::IdentifiersExhausted);
            }
        }
    }
}
