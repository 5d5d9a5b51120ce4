//! Layer Registry
//!
//! Name-addressed storage for registered layers. The registry only answers
//! "which layers exist"; where they sit is tracked by [`LayerOrder`](super::LayerOrder).

use rustc_hash::{FxBuildHasher, FxHashMap};
use slotmap::{SlotMap, new_key_type};

use crate::errors::{LayerError, Result};
use crate::layer::{DrawContext, DrawLayer};

new_key_type! {
    /// Stable handle of a registered layer.
    pub struct LayerKey;
}

/// Registered layers, keyed by [`LayerKey`] and looked up by name.
pub struct LayerRegistry<C: DrawContext> {
    layers: SlotMap<LayerKey, Box<dyn DrawLayer<C>>>,
    names: FxHashMap<String, LayerKey>,
}

impl<C: DrawContext> Default for LayerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: DrawContext> LayerRegistry<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layers: SlotMap::with_capacity_and_key(capacity),
            names: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Stores a layer under its name.
    ///
    /// Fails with [`LayerError::DuplicateName`] if the name is taken; the
    /// registry is left untouched in that case.
    pub fn register(&mut self, layer: Box<dyn DrawLayer<C>>) -> Result<LayerKey> {
        let name = layer.name();
        if self.names.contains_key(name) {
            return Err(LayerError::DuplicateName(name.to_owned()));
        }
        let name = name.to_owned();
        let key = self.layers.insert(layer);
        self.names.insert(name, key);
        Ok(key)
    }

    /// Removes a layer and hands it back to the caller.
    pub fn unregister(&mut self, name: &str) -> Result<(LayerKey, Box<dyn DrawLayer<C>>)> {
        let key = self
            .names
            .remove(name)
            .ok_or_else(|| LayerError::NotFound(name.to_owned()))?;
        let layer = self
            .layers
            .remove(key)
            .ok_or_else(|| LayerError::NotFound(name.to_owned()))?;
        Ok((key, layer))
    }

    pub fn get(&self, name: &str) -> Result<&dyn DrawLayer<C>> {
        self.key(name)
            .and_then(|key| self.layers.get(key))
            .map(Box::as_ref)
            .ok_or_else(|| LayerError::NotFound(name.to_owned()))
    }

    #[inline]
    #[must_use]
    pub fn key(&self, name: &str) -> Option<LayerKey> {
        self.names.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn by_key(&self, key: LayerKey) -> Option<&dyn DrawLayer<C>> {
        self.layers.get(key).map(Box::as_ref)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Stores a layer whose name is known to be unique, such as one taken
    /// back out of a sealed pipeline.
    pub(crate) fn restore(&mut self, layer: Box<dyn DrawLayer<C>>) -> LayerKey {
        debug_assert!(!self.names.contains_key(layer.name()), "restored duplicate layer");
        let name = layer.name().to_owned();
        let key = self.layers.insert(layer);
        self.names.insert(name, key);
        key
    }

    /// Moves the layer out of the registry. Used when the pipeline is sealed.
    pub(crate) fn take(&mut self, key: LayerKey) -> Option<Box<dyn DrawLayer<C>>> {
        let layer = self.layers.remove(key)?;
        self.names.remove(layer.name());
        Some(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{DrawBuffer, FnLayer};

    #[derive(Default)]
    struct Frame {
        output: DrawBuffer<u32>,
    }

    impl DrawContext for Frame {
        type Primitive = u32;
        type Error = ();

        fn output(&self) -> &DrawBuffer<u32> {
            &self.output
        }

        fn output_mut(&mut self) -> &mut DrawBuffer<u32> {
            &mut self.output
        }
    }

    fn layer(name: &str) -> Box<dyn DrawLayer<Frame>> {
        Box::new(FnLayer::<Frame>::new(name, false, |_: &mut Frame| Ok(())))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = LayerRegistry::new();
        let key = registry.register(layer("Skin")).unwrap();

        assert_eq!(registry.key("Skin"), Some(key));
        assert_eq!(registry.get("Skin").unwrap().name(), "Skin");
        assert!(matches!(registry.get("Wings"), Err(LayerError::NotFound(name)) if name == "Wings"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = LayerRegistry::new();
        registry.register(layer("Skin")).unwrap();

        let err = registry.register(layer("Skin")).unwrap_err();
        assert!(matches!(err, LayerError::DuplicateName(name) if name == "Skin"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister() {
        let mut registry = LayerRegistry::new();
        registry.register(layer("Skin")).unwrap();

        let (_, removed) = registry.unregister("Skin").unwrap();
        assert_eq!(removed.name(), "Skin");
        assert!(registry.is_empty());
        assert!(matches!(registry.unregister("Skin"), Err(LayerError::NotFound(_))));
    }
}
