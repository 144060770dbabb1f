//! Render object store
//!
//! Objects live in a `BTreeMap` keyed by `(depth, insertion sequence)`, so
//! iteration is ascending depth with ties in insertion order, and reverse
//! iteration gives hit-test order. A side index maps identifiers to keys.

use std::collections::{BTreeMap, HashMap};

use super::{RenderKind, RenderObject};
use crate::graphics::GraphicsError;
use crate::render::{Placement, Texture, Viewport};

/// Ordering key: depth first, then insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct DrawKey {
    depth: i32,
    sequence: u64,
}

/// Depth-ordered collection of render objects keyed by identifier
#[derive(Debug, Default)]
pub struct RenderObjectStore {
    objects: BTreeMap<DrawKey, RenderObject>,
    index: HashMap<i32, DrawKey>,
    next_sequence: u64,
}

impl RenderObjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a render object
    ///
    /// The pixel rect is derived from `placement` on `viewport`. Adding an
    /// identifier that is already present is rejected and the texture is
    /// dropped.
    pub fn add(
        &mut self,
        identifier: i32,
        kind: RenderKind,
        depth: i32,
        placement: Placement,
        texture: Texture,
        viewport: &Viewport,
    ) -> Result<(), GraphicsError> {
        if self.index.contains_key(&identifier) {
            return Err(GraphicsError::DuplicateIdentifier(identifier));
        }

        let object = RenderObject::new(identifier, kind, depth, placement, texture, viewport);
        let key = DrawKey {
            depth,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        log::debug!(
            "Added render object {} ({:?}, depth {}) at {:?}",
            identifier,
            kind,
            depth,
            object.rect()
        );
        self.index.insert(identifier, key);
        self.objects.insert(key, object);
        Ok(())
    }

    /// Remove an object, handing it back to the caller
    ///
    /// Returns `None` for unknown identifiers. Dropping the returned object
    /// releases its texture.
    pub fn remove(&mut self, identifier: i32) -> Option<RenderObject> {
        let key = self.index.remove(&identifier)?;
        self.objects.remove(&key)
    }

    /// Look up an object
    pub fn get(&self, identifier: i32) -> Option<&RenderObject> {
        self.index.get(&identifier).and_then(|key| self.objects.get(key))
    }

    /// Check whether an identifier is live
    pub fn contains(&self, identifier: i32) -> bool {
        self.index.contains_key(&identifier)
    }

    /// Remove every non-reserved object, or everything when `include_reserved`
    ///
    /// Returns the number of objects removed.
    pub fn clear(&mut self, include_reserved: bool) -> usize {
        let before = self.objects.len();
        if include_reserved {
            self.objects.clear();
            self.index.clear();
        } else {
            self.objects.retain(|_, object| object.is_reserved());
            let objects = &self.objects;
            self.index.retain(|_, key| objects.contains_key(key));
        }
        before - self.objects.len()
    }

    /// Re-derive every rect after a viewport change
    pub fn relayout(&mut self, viewport: &Viewport) {
        for object in self.objects.values_mut() {
            object.relayout(viewport);
        }
    }

    /// Objects in draw order (ascending depth)
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &RenderObject> + '_ {
        self.objects.values()
    }

    /// Objects in hit-test order (descending depth)
    pub fn iter_rev(&self) -> impl Iterator<Item = &RenderObject> + '_ {
        self.objects.values().rev()
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when no objects are live
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
