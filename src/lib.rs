//! # Stratum
//!
//! Ordered, anchor-relative draw-layer pipelines.
//!
//! A character renderer draws an entity as a stack of layers: back hair, the
//! mount behind the player, skin, leggings, torso armor, the head, a shield,
//! debuff overlays. Stratum keeps that stack as an ordered registry of named
//! layers that extensions can extend by inserting new layers *relative to*
//! existing ones, then runs it once per frame against a host-owned draw
//! context.
//!
//! # Modules
//!
//! - [`layer`]: the [`DrawLayer`] trait, [`FnLayer`] and the [`DrawBuffer`]
//! - [`pipeline`]: registration ([`PipelineBuilder`]) and per-frame
//!   compositing ([`Compositor`])
//! - [`config`]: [`PipelineSettings`] and JSON [`LayerTable`]s
//! - [`errors`]: the [`LayerError`] taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use stratum::{FnLayer, PipelineBuilder, Position};
//!
//! let mut builder = PipelineBuilder::new();
//! builder
//!     .append(FnLayer::new("Skin", false, draw_skin))?
//!     .append(FnLayer::new("Head", true, draw_head))?
//!     .register(FnLayer::new("Scarf", false, draw_scarf), Position::between("Skin", "Head"))?;
//!
//! let compositor = builder.build();
//! for frame in frames {
//!     draw_set.output_mut().clear();
//!     compositor.composite(&mut draw_set)?;
//! }
//! ```

pub mod config;
pub mod errors;
pub mod layer;
pub mod pipeline;

pub use config::{LayerEntry, LayerTable, PipelineSettings};
pub use errors::{LayerError, Result};
pub use layer::{DrawBuffer, DrawContext, DrawFn, DrawLayer, FnLayer, SetupFn};
pub use pipeline::{
    BetweenPolicy, Compositor, FrameSummary, LayerKey, OrderView, PipelineBuilder, Position,
};
