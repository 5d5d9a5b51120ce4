//! Frame Compositor
//!
//! `Compositor` is the sealed, render-phase form of a layer pipeline. Once per
//! frame the host hands it a [`DrawContext`]; the compositor walks the layers
//! in resolved order, asks each one whether it takes part in this frame and
//! lets the active ones append their primitives.
//!
//! # Execution Model
//!
//! - Strictly sequential, on the caller's thread, in resolved order
//! - No reordering, no caching of predicate results across layers or frames
//! - Errors from `setup` or `draw` abort the pass and are returned unchanged
//! - Primitives appended before a failure stay in the buffer

use std::fmt;

use smallvec::SmallVec;

use crate::config::PipelineSettings;
use crate::errors::{LayerError, Result};
use crate::layer::{DrawContext, DrawLayer};

use super::builder::PipelineBuilder;
use super::view::OrderView;

/// A layer in its final position.
pub(crate) struct Slot<C: DrawContext> {
    pub(crate) layer: Box<dyn DrawLayer<C>>,
    /// Cleared by the host to take a misbehaving layer out of later frames.
    pub(crate) enabled: bool,
}

/// Outcome of one composite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Layers whose `draw` ran.
    pub drawn: usize,
    /// Layers that were disabled or whose `setup` returned `false`.
    pub skipped: usize,
    /// Primitives appended to the output buffer during the pass.
    pub primitives: usize,
}

/// Sealed layer pipeline.
///
/// Produced by [`PipelineBuilder::build`]. The order is fixed for the
/// lifetime of the compositor; a full reload goes through
/// [`into_builder`](Self::into_builder).
pub struct Compositor<C: DrawContext> {
    slots: Vec<Slot<C>>,
    /// Indices of head layers, in resolved order.
    head: SmallVec<[usize; 16]>,
    settings: PipelineSettings,
}

impl<C: DrawContext> Compositor<C> {
    pub(crate) fn new(slots: Vec<Slot<C>>, settings: PipelineSettings) -> Self {
        let head = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.layer.is_head_layer())
            .map(|(index, _)| index)
            .collect();

        Self {
            slots,
            head,
            settings,
        }
    }

    /// Runs every layer against `ctx` in resolved order.
    pub fn composite(&self, ctx: &mut C) -> std::result::Result<FrameSummary, C::Error> {
        self.run(ctx, 0..self.slots.len())
    }

    /// Runs only the head layers, in the same relative order as
    /// [`composite`](Self::composite). Used for icon-sized renders.
    pub fn composite_head_layers(
        &self,
        ctx: &mut C,
    ) -> std::result::Result<FrameSummary, C::Error> {
        self.run(ctx, self.head.iter().copied())
    }

    fn run<I>(&self, ctx: &mut C, indices: I) -> std::result::Result<FrameSummary, C::Error>
    where
        I: Iterator<Item = usize>,
    {
        let start = ctx.output().len();
        let mut summary = FrameSummary::default();

        for index in indices {
            let slot = &self.slots[index];
            let name = slot.layer.name();

            if !slot.enabled {
                log::trace!("Layer '{name}' disabled, skipping");
                summary.skipped += 1;
                continue;
            }

            let view = OrderView::new(&self.slots, index);
            if !slot.layer.setup(ctx, &view)? {
                summary.skipped += 1;
                continue;
            }

            let before = ctx.output().len();
            slot.layer.draw(ctx)?;
            log::trace!(
                "Layer '{name}' drew {} primitives",
                ctx.output().since(before).len()
            );
            summary.drawn += 1;
        }

        summary.primitives = ctx.output().since(start).len();
        Ok(summary)
    }

    /// Enables or disables a layer for subsequent passes.
    ///
    /// A disabled layer is skipped without evaluating its `setup`.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.layer.name() == name)
            .ok_or_else(|| LayerError::NotFound(name.to_owned()))?;

        if slot.enabled != enabled {
            log::debug!(
                "Layer '{name}' {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
        slot.enabled = enabled;
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> Result<bool> {
        self.slot(name).map(|slot| slot.enabled)
    }

    pub fn get(&self, name: &str) -> Result<&dyn DrawLayer<C>> {
        self.slot(name).map(|slot| slot.layer.as_ref())
    }

    fn slot(&self, name: &str) -> Result<&Slot<C>> {
        self.slots
            .iter()
            .find(|slot| slot.layer.name() == name)
            .ok_or_else(|| LayerError::NotFound(name.to_owned()))
    }

    /// Index of `name` in the resolved order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.layer.name() == name)
    }

    /// Layer names in resolved order.
    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.layer.name())
    }

    /// Names of the head layers in resolved order.
    pub fn head_layers(&self) -> impl Iterator<Item = &str> {
        self.head.iter().map(|&index| self.slots[index].layer.name())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Reopens the pipeline for a full reload.
    ///
    /// The builder starts with the current order; enabled flags are reset.
    #[must_use]
    pub fn into_builder(self) -> PipelineBuilder<C> {
        log::debug!("Reopening pipeline with {} layers", self.slots.len());
        PipelineBuilder::from_ordered(
            self.settings,
            self.slots.into_iter().map(|slot| slot.layer),
        )
    }
}

impl<C: DrawContext> fmt::Debug for Compositor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compositor")
            .field("order", &self.order().collect::<Vec<_>>())
            .field("head", &self.head)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
