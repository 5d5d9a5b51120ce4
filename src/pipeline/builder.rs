//! Pipeline Builder
//!
//! `PipelineBuilder` is the load-phase form of a layer pipeline. Extension
//! loaders register layers into it, each at a position relative to layers
//! registered before; [`build`](PipelineBuilder::build) then seals it into a
//! [`Compositor`] for the render phase.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut builder = PipelineBuilder::new();
//! builder
//!     .register(hair_back, Position::Append)?
//!     .register(torso, Position::Append)?
//!     .register(cape, Position::before("Torso"))?;
//!
//! let compositor = builder.build();
//! compositor.composite(&mut draw_set)?;
//! ```

use std::fmt;

use crate::config::PipelineSettings;
use crate::errors::{LayerError, Result};
use crate::layer::{DrawContext, DrawLayer};

use super::compositor::{Compositor, Slot};
use super::order::LayerOrder;
use super::position::Position;
use super::registry::LayerRegistry;

/// Load-phase layer pipeline.
///
/// # Guarantees
///
/// - Layer names are unique
/// - The order holds every registered layer exactly once
/// - A failed registration changes nothing
pub struct PipelineBuilder<C: DrawContext> {
    registry: LayerRegistry<C>,
    order: LayerOrder,
    settings: PipelineSettings,
}

impl<C: DrawContext> Default for PipelineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: DrawContext> PipelineBuilder<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(PipelineSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: PipelineSettings) -> Self {
        Self {
            registry: LayerRegistry::with_capacity(settings.capacity),
            order: LayerOrder::with_capacity(settings.capacity),
            settings,
        }
    }

    /// Rebuilds a builder from uniquely named layers that are already in
    /// their final order.
    pub(crate) fn from_ordered<I>(settings: PipelineSettings, layers: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn DrawLayer<C>>>,
    {
        let mut builder = Self::with_settings(settings);
        for layer in layers {
            let key = builder.registry.restore(layer);
            builder.order.insert(builder.order.len(), key);
        }
        builder
    }

    /// Registers a layer at `position`.
    ///
    /// Supports chaining through `?`.
    pub fn register<L>(&mut self, layer: L, position: Position) -> Result<&mut Self>
    where
        L: DrawLayer<C> + 'static,
    {
        self.register_boxed(Box::new(layer), position)
    }

    /// Registers a boxed layer at `position`.
    ///
    /// # Errors
    ///
    /// - [`DuplicateName`](LayerError::DuplicateName) if the name is taken
    /// - [`AnchorNotFound`](LayerError::AnchorNotFound) if an anchor is unknown
    /// - [`Adjacency`](LayerError::Adjacency) if `Between` anchors are not neighbours
    pub fn register_boxed(
        &mut self,
        layer: Box<dyn DrawLayer<C>>,
        position: Position,
    ) -> Result<&mut Self> {
        let index = self
            .resolve(layer.as_ref(), &position)
            .inspect_err(|err| log::warn!("Rejected layer registration: {err}"))?;

        let key = self.registry.register(layer)?;
        self.order.insert(index, key);

        if let Some(layer) = self.registry.by_key(key) {
            log::debug!("Registered layer '{}' {position} at {index}", layer.name());
        }
        Ok(self)
    }

    fn resolve(&self, layer: &dyn DrawLayer<C>, position: &Position) -> Result<usize> {
        let name = layer.name();
        if self.registry.contains(name) {
            return Err(LayerError::DuplicateName(name.to_owned()));
        }
        self.order
            .resolve(name, position, self.settings.between, |anchor| {
                self.registry.key(anchor)
            })
    }

    /// Registers a layer after every layer currently in the order.
    pub fn append<L>(&mut self, layer: L) -> Result<&mut Self>
    where
        L: DrawLayer<C> + 'static,
    {
        self.register(layer, Position::Append)
    }

    /// Removes a layer, returning it. Layers placed relative to it keep
    /// their current positions.
    pub fn unregister(&mut self, name: &str) -> Result<Box<dyn DrawLayer<C>>> {
        let (key, layer) = self.registry.unregister(name)?;
        self.order.remove(key);
        log::debug!("Unregistered layer '{name}'");
        Ok(layer)
    }

    pub fn get(&self, name: &str) -> Result<&dyn DrawLayer<C>> {
        self.registry.get(name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Layer names in the current resolved order.
    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.order
            .keys()
            .iter()
            .filter_map(|&key| self.registry.by_key(key))
            .map(|layer| layer.name())
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Seals the pipeline for the render phase.
    #[must_use]
    pub fn build(mut self) -> Compositor<C> {
        let mut slots = Vec::with_capacity(self.order.len());
        for key in self.order.drain() {
            if let Some(layer) = self.registry.take(key) {
                slots.push(Slot {
                    layer,
                    enabled: true,
                });
            }
        }

        log::debug!("Pipeline sealed with {} layers", slots.len());
        Compositor::new(slots, self.settings)
    }
}

impl<C: DrawContext> fmt::Debug for PipelineBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("order", &self.order().collect::<Vec<_>>())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
