//! Draw Layer Trait
//!
//! Defines the abstract interface of a node in the layer pipeline.
//! Each layer is one named, orderable, conditionally active unit of drawing
//! work: hair, a torso, a shield, a debuff overlay, or a purely technical
//! step that shifts the draw position for the layers after it.
//!
//! Provides:
//! - [`DrawContext`]: the per-frame state a host hands to the compositor
//! - [`DrawLayer`]: the two-operation capability every layer implements
//! - [`FnLayer`]: a closure-backed layer for table-driven or one-off layers
//! - [`DrawBuffer`]: the ordered primitive buffer layers append to

pub mod buffer;

use std::fmt;

pub use buffer::DrawBuffer;

use crate::pipeline::OrderView;

/// Per-frame drawing state owned by the host renderer.
///
/// The compositor borrows the context for exactly one pass and never keeps a
/// reference to it. Everything a layer inspects (the entity being drawn, its
/// equipment, its pose) lives in the implementing type and is opaque to the
/// pipeline.
pub trait DrawContext {
    /// Primitive type appended to the output buffer.
    type Primitive;

    /// Error type layers may fail with while a frame is composited.
    ///
    /// Errors of this type are returned from the composite pass unchanged.
    type Error;

    /// The shared output buffer of the current frame.
    fn output(&self) -> &DrawBuffer<Self::Primitive>;

    /// Mutable access to the shared output buffer of the current frame.
    fn output_mut(&mut self) -> &mut DrawBuffer<Self::Primitive>;
}

/// Draw layer trait.
///
/// # Design
/// - `setup` only reads the context and decides whether the layer takes part
///   in the current frame. It must not have side effects.
/// - `draw` appends primitives to the context's output buffer.
/// - The name is the layer's identity; it must not change after registration.
pub trait DrawLayer<C: DrawContext> {
    /// Unique name of the layer, used as its identity and as an anchor by
    /// other layers.
    fn name(&self) -> &str;

    /// Whether this layer is drawn in the restricted head-only pass
    /// (minimap icons and similar).
    fn is_head_layer(&self) -> bool {
        false
    }

    /// Decides whether the layer is drawn for this frame.
    ///
    /// `order` is the resolved layer order, positioned at this layer.
    fn setup(&self, _ctx: &C, _order: &OrderView<'_, C>) -> Result<bool, C::Error> {
        Ok(true)
    }

    /// Appends this layer's primitives to the context's output buffer.
    fn draw(&self, ctx: &mut C) -> Result<(), C::Error>;
}

/// Boxed activation predicate of an [`FnLayer`].
pub type SetupFn<C> =
    Box<dyn Fn(&C, &OrderView<'_, C>) -> Result<bool, <C as DrawContext>::Error>>;

/// Boxed draw action of an [`FnLayer`].
pub type DrawFn<C> = Box<dyn Fn(&mut C) -> Result<(), <C as DrawContext>::Error>>;

/// A layer made of a name, a head-layer flag and a draw function.
///
/// Without a predicate the layer is drawn on every frame.
///
/// ```rust,ignore
/// let hair = FnLayer::new("HairBack", true, |set: &mut PlayerDrawSet| {
///     set.output_mut().push(Sprite::hair(set.player.hair));
///     Ok(())
/// })
/// .with_setup(|set, _order| Ok(!set.player.hide_hair));
/// ```
pub struct FnLayer<C: DrawContext> {
    name: String,
    head_layer: bool,
    setup: Option<SetupFn<C>>,
    draw: DrawFn<C>,
}

impl<C: DrawContext> FnLayer<C> {
    pub fn new<F>(name: impl Into<String>, head_layer: bool, draw: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), C::Error> + 'static,
    {
        Self::from_boxed(name, head_layer, Box::new(draw))
    }

    /// Builds a layer from an already boxed draw function, as produced by a
    /// layer table binder.
    #[must_use]
    pub fn from_boxed(name: impl Into<String>, head_layer: bool, draw: DrawFn<C>) -> Self {
        Self {
            name: name.into(),
            head_layer,
            setup: None,
            draw,
        }
    }

    /// Attaches an activation predicate.
    #[must_use]
    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: Fn(&C, &OrderView<'_, C>) -> Result<bool, C::Error> + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }
}

impl<C: DrawContext> DrawLayer<C> for FnLayer<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_head_layer(&self) -> bool {
        self.head_layer
    }

    fn setup(&self, ctx: &C, order: &OrderView<'_, C>) -> Result<bool, C::Error> {
        match &self.setup {
            Some(setup) => setup(ctx, order),
            None => Ok(true),
        }
    }

    fn draw(&self, ctx: &mut C) -> Result<(), C::Error> {
        (self.draw)(ctx)
    }
}

impl<C: DrawContext> fmt::Debug for FnLayer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLayer")
            .field("name", &self.name)
            .field("head_layer", &self.head_layer)
            .field("has_setup", &self.setup.is_some())
            .finish_non_exhaustive()
    }
}
