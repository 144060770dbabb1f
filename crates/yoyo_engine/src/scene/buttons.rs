//! Button registry
//!
//! Buttons are a non-owning association from a Button-kind render object's
//! identifier to a [`Callback`]. The registry never touches textures; it
//! only looks objects up in the store to hit-test their current rects.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::{RenderKind, RenderObjectStore};
use crate::graphics::{Graphics, GraphicsError};

/// Number of positional parameters every callback carries
pub const CALLBACK_ARITY: usize = 4;

/// One positional callback parameter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CallbackParam {
    /// Unused slot
    #[default]
    None,
    /// String parameter
    Str(String),
    /// Integer parameter
    Int(i32),
    /// Float parameter
    Float(f32),
}

impl From<&str> for CallbackParam {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for CallbackParam {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i32> for CallbackParam {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for CallbackParam {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

/// Fixed-arity parameter tuple
///
/// Always exactly [`CALLBACK_ARITY`] slots; unused slots hold
/// [`CallbackParam::None`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallbackParams([CallbackParam; CALLBACK_ARITY]);

impl CallbackParams {
    /// Build from all four slots
    pub const fn new(params: [CallbackParam; CALLBACK_ARITY]) -> Self {
        Self(params)
    }

    /// Fill the leading slots from `params`
    ///
    /// Returns `None` if more than [`CALLBACK_ARITY`] values are given.
    pub fn from_slice(params: &[CallbackParam]) -> Option<Self> {
        if params.len() > CALLBACK_ARITY {
            return None;
        }
        let mut slots: [CallbackParam; CALLBACK_ARITY] = Default::default();
        slots[..params.len()].clone_from_slice(params);
        Some(Self(slots))
    }

    /// Parameter in `slot`, if the slot exists
    pub fn get(&self, slot: usize) -> Option<&CallbackParam> {
        self.0.get(slot)
    }

    /// String parameter in `slot`
    pub fn str(&self, slot: usize) -> Option<&str> {
        match self.get(slot)? {
            CallbackParam::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Integer parameter in `slot`
    pub fn int(&self, slot: usize) -> Option<i32> {
        match self.get(slot)? {
            CallbackParam::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Float parameter in `slot`
    pub fn float(&self, slot: usize) -> Option<f32> {
        match self.get(slot)? {
            CallbackParam::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// All slots in order
    pub fn as_slice(&self) -> &[CallbackParam] {
        &self.0
    }
}

/// Code run when a button is clicked
///
/// Receives the graphics context so it can rebuild the scene.
pub type CallbackHandler = Rc<dyn Fn(&mut Graphics, &Callback)>;

/// Callback descriptor: action name, parameters and handler
#[derive(Clone)]
pub struct Callback {
    action: String,
    params: CallbackParams,
    handler: CallbackHandler,
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("action", &self.action)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Callback {
    /// Create a callback with empty parameters
    pub fn new(action: impl Into<String>, handler: impl Fn(&mut Graphics, &Self) + 'static) -> Self {
        Self {
            action: action.into(),
            params: CallbackParams::default(),
            handler: Rc::new(handler),
        }
    }

    /// Set the parameters (builder pattern)
    pub fn with_params(mut self, params: CallbackParams) -> Self {
        self.params = params;
        self
    }

    /// Action discriminator
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Stored parameters
    pub const fn params(&self) -> &CallbackParams {
        &self.params
    }

    /// Run the handler
    pub fn invoke(&self, graphics: &mut Graphics) {
        (self.handler)(graphics, self);
    }
}

/// Callbacks keyed by the identifier of their Button-kind render object
#[derive(Debug, Default)]
pub struct ButtonRegistry {
    buttons: HashMap<i32, Callback>,
}

impl ButtonRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a callback to an existing Button-kind render object
    ///
    /// Re-registering replaces the previous callback.
    pub fn register(
        &mut self,
        identifier: i32,
        callback: Callback,
        store: &RenderObjectStore,
    ) -> Result<(), GraphicsError> {
        let object = store
            .get(identifier)
            .ok_or(GraphicsError::UnknownIdentifier(identifier))?;
        if object.kind() != RenderKind::Button {
            return Err(GraphicsError::NotAButton(identifier));
        }

        log::debug!("Registered button {} -> '{}'", identifier, callback.action());
        self.buttons.insert(identifier, callback);
        Ok(())
    }

    /// Detach the callback from a render object
    pub fn unregister(&mut self, identifier: i32) -> Option<Callback> {
        self.buttons.remove(&identifier)
    }

    /// Callback registered for `identifier`
    pub fn callback(&self, identifier: i32) -> Option<&Callback> {
        self.buttons.get(&identifier)
    }

    /// Check whether `identifier` has a callback
    pub fn contains(&self, identifier: i32) -> bool {
        self.buttons.contains_key(&identifier)
    }

    /// Find the button under a screen point
    ///
    /// Objects are visited in descending depth (topmost first) and the first
    /// registered button whose rect contains the point wins; buttons beneath
    /// it are never considered.
    pub fn hit_test(&self, store: &RenderObjectStore, x: i32, y: i32) -> Option<i32> {
        if self.buttons.is_empty() {
            return None;
        }
        store
            .iter_rev()
            .filter(|object| self.buttons.contains_key(&object.identifier()))
            .find(|object| object.rect().contains(x, y))
            .map(|object| object.identifier())
    }

    /// Drop callbacks whose render object is gone
    ///
    /// Returns the number of callbacks removed.
    pub fn retain_live(&mut self, store: &RenderObjectStore) -> usize {
        let before = self.buttons.len();
        self.buttons.retain(|identifier, _| store.contains(*identifier));
        before - self.buttons.len()
    }

    /// Number of registered buttons
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// True when no buttons are registered
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
