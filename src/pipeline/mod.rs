//! Layer Pipeline
//!
//! Provides:
//! - [`PipelineBuilder`]: load-phase registration with relative positions
//! - [`Compositor`]: sealed render-phase pipeline, run once per frame
//! - [`LayerRegistry`]: name-addressed layer storage
//! - [`LayerOrder`]: the resolved total order
//! - [`Position`]: `Append` / `Before` / `After` / `Between` directives
//! - [`OrderView`]: read-only order handed to layer predicates
//!
//! # Two-Phase Lifecycle
//!
//! 1. **Load**: extension loaders register layers into a `PipelineBuilder`.
//!    Every registration is validated immediately and either applied in
//!    full or rejected without side effects.
//! 2. **Render**: `build()` seals the builder into a `Compositor`. The order
//!    can no longer change; each frame calls `composite` (or
//!    `composite_head_layers` for icon renders).
//!
//! A full reload goes back through [`Compositor::into_builder`].

pub mod builder;
pub mod compositor;
pub mod order;
pub mod position;
pub mod registry;
pub mod view;

pub use builder::PipelineBuilder;
pub use compositor::{Compositor, FrameSummary};
pub use order::LayerOrder;
pub use position::{BetweenPolicy, Position};
pub use registry::{LayerKey, LayerRegistry};
pub use view::OrderView;
