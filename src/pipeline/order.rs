//! Resolved Layer Order
//!
//! `LayerOrder` is the total order of registered layers. Positions are
//! resolved eagerly against the current sequence, so a registration sees the
//! effect of every registration before it and no constraint graph is needed.

use crate::errors::{LayerError, Result};

use super::position::{BetweenPolicy, Position};
use super::registry::LayerKey;

/// Total order of layer keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerOrder {
    keys: Vec<LayerKey>,
}

impl LayerOrder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
        }
    }

    /// Computes the insertion index of `layer` for `position`.
    ///
    /// `lookup` maps an anchor name to its key. Nothing is modified, so a
    /// failed resolution leaves the order as it was.
    pub fn resolve<F>(
        &self,
        layer: &str,
        position: &Position,
        policy: BetweenPolicy,
        lookup: F,
    ) -> Result<usize>
    where
        F: Fn(&str) -> Option<LayerKey>,
    {
        let index_of = |anchor: &str| {
            lookup(anchor)
                .and_then(|key| self.index_of(key))
                .ok_or_else(|| LayerError::AnchorNotFound {
                    layer: layer.to_owned(),
                    anchor: anchor.to_owned(),
                })
        };

        match position {
            Position::Append => Ok(self.keys.len()),
            Position::Before(anchor) => index_of(anchor),
            Position::After(anchor) => index_of(anchor).map(|index| index + 1),
            Position::Between(first, second) => {
                let a = index_of(first)?;
                let b = index_of(second)?;
                if b == a + 1 {
                    Ok(b)
                } else if policy == BetweenPolicy::EitherOrder && a == b + 1 {
                    Ok(a)
                } else {
                    Err(LayerError::Adjacency {
                        layer: layer.to_owned(),
                        first: first.clone(),
                        second: second.clone(),
                    })
                }
            }
        }
    }

    /// Inserts `key` at `index`, shifting later layers back.
    ///
    /// `index` must come from [`resolve`](Self::resolve) on the current order.
    pub fn insert(&mut self, index: usize, key: LayerKey) {
        debug_assert!(!self.keys.contains(&key), "layer key inserted twice");
        self.keys.insert(index, key);
    }

    /// Removes `key`, returning the index it occupied.
    pub fn remove(&mut self, key: LayerKey) -> Option<usize> {
        let index = self.index_of(key)?;
        self.keys.remove(index);
        Some(index)
    }

    #[inline]
    #[must_use]
    pub fn index_of(&self, key: LayerKey) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }

    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[LayerKey] {
        &self.keys
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, LayerKey> {
        self.keys.drain(..)
    }
}
