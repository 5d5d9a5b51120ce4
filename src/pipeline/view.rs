//! Order View
//!
//! The read-only window on the resolved layer order that a layer's
//! [`setup`](crate::layer::DrawLayer::setup) receives. It lets a layer decide
//! based on its neighbours (for example, only draw when a given layer is
//! present earlier in the frame) without being able to change the order.

use crate::layer::DrawContext;

use super::compositor::Slot;

/// Read-only view of the resolved order, positioned at the layer being set up.
pub struct OrderView<'a, C: DrawContext> {
    slots: &'a [Slot<C>],
    cursor: usize,
}

impl<'a, C: DrawContext> OrderView<'a, C> {
    pub(crate) fn new(slots: &'a [Slot<C>], cursor: usize) -> Self {
        Self { slots, cursor }
    }

    /// Index of the layer currently being set up.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Name of the layer currently being set up.
    #[must_use]
    pub fn current(&self) -> Option<&'a str> {
        self.name(self.cursor)
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

    #[must_use]
    pub fn name(&self, index: usize) -> Option<&'a str> {
        self.slots.get(index).map(|slot| slot.layer.name())
    }

    /// All layer names, in resolved order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + use<'a, C> {
        self.slots.iter().map(|slot| slot.layer.name())
    }

    /// Names of the layers ordered before the current one.
    pub fn preceding(&self) -> impl Iterator<Item = &'a str> + use<'a, C> {
        let end = self.cursor.min(self.slots.len());
        self.slots[..end].iter().map(|slot| slot.layer.name())
    }

    /// Index of `name` in the resolved order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.layer.name() == name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Whether `name` is registered and currently enabled by the host.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.enabled && slot.layer.name() == name)
    }
}
