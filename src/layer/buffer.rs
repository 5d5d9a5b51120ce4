//! Draw Buffer
//!
//! `DrawBuffer` is the ordered output of a composite pass. Layers append
//! primitives to it; later primitives sit visually above earlier ones.

use std::slice;

/// Ordered buffer of draw primitives.
///
/// The buffer is owned by the host's draw context. The compositor only ever
/// appends to it through the layers it runs, and never clears it: resetting
/// between frames is the host's job (see [`DrawBuffer::clear`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawBuffer<P> {
    items: Vec<P>,
}

impl<P> Default for DrawBuffer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DrawBuffer<P> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates a buffer with room for `capacity` primitives.
    ///
    /// Hosts usually keep one buffer alive across frames, so the capacity
    /// settles after the first few frames.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a primitive on top of everything drawn so far.
    #[inline]
    pub fn push(&mut self, primitive: P) {
        self.items.push(primitive);
    }

    /// Removes all primitives, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[P] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, P> {
        self.items.iter()
    }

    /// Primitives appended after the first `start` ones.
    ///
    /// Returns an empty slice when `start` is past the end.
    #[inline]
    #[must_use]
    pub fn since(&self, start: usize) -> &[P] {
        self.items.get(start..).unwrap_or(&[])
    }
}

impl<P> Extend<P> for DrawBuffer<P> {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, P> IntoIterator for &'a DrawBuffer<P> {
    type Item = &'a P;
    type IntoIter = slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut buffer = DrawBuffer::new();
        buffer.push("hair");
        buffer.extend(["torso", "hat"]);

        assert_eq!(buffer.as_slice(), &["hair", "torso", "hat"]);
        assert_eq!(buffer.since(1), &["torso", "hat"]);
        assert!(buffer.since(5).is_empty());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buffer = DrawBuffer::with_capacity(8);
        buffer.extend(0..4);
        buffer.clear();

        assert!(buffer.is_empty());
        assert!(buffer.items.capacity() >= 8);
    }
}
