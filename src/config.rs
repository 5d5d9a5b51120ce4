//! Pipeline Settings & Layer Tables
//!
//! This module holds the load-phase configuration of a layer pipeline:
//!
//! - [`PipelineSettings`]: knobs consumed once when a [`PipelineBuilder`] is created
//! - [`LayerTable`]: a declarative list of `(name, head_layer, position)`
//!   entries, usually shipped as JSON, that a host turns into layers by
//!   binding a draw function to every entry
//!
//! # Layer Table Format
//!
//! ```json
//! {
//!     "settings": { "capacity": 48, "between": "either_order" },
//!     "layers": [
//!         { "name": "HairBack", "head_layer": true },
//!         { "name": "Torso" },
//!         { "name": "Cape", "position": { "before": "Torso" } },
//!         { "name": "Scarf", "position": { "between": ["Cape", "Torso"] } }
//!     ]
//! }
//! ```
//!
//! Entries are applied top to bottom, exactly as if the host had called
//! [`PipelineBuilder::register`] for each of them.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! let table = LayerTable::from_json(include_str!("player_layers.json"))?;
//! let compositor = table.build(|entry| sprites.draw_fn(&entry.name))?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{LayerError, Result};
use crate::layer::{DrawContext, DrawFn, FnLayer};
use crate::pipeline::{BetweenPolicy, Compositor, PipelineBuilder, Position};

// ---------------------------------------------------------------------------
// PipelineSettings
// ---------------------------------------------------------------------------

/// Configuration for a layer pipeline.
///
/// # Fields
///
/// | Field      | Description                                    | Default       |
/// |------------|------------------------------------------------|---------------|
/// | `capacity` | Number of layers to reserve room for           | `48`          |
/// | `between`  | Adjacency rule for `Between` positions         | `EitherOrder` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Number of layers to preallocate storage for.
    ///
    /// A typical character renderer has a few dozen built-in layers plus
    /// whatever extensions add.
    pub capacity: usize,

    /// How `Between` positions check that their anchors are neighbours.
    pub between: BetweenPolicy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            capacity: 48,
            between: BetweenPolicy::EitherOrder,
        }
    }
}

// ---------------------------------------------------------------------------
// LayerTable
// ---------------------------------------------------------------------------

/// One row of a [`LayerTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    #[serde(default)]
    pub head_layer: bool,
    #[serde(default)]
    pub position: Position,
}

impl LayerEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, head_layer: bool, position: Position) -> Self {
        Self {
            name: name.into(),
            head_layer,
            position,
        }
    }
}

/// Declarative list of layers, loaded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerTable {
    pub settings: PipelineSettings,
    pub layers: Vec<LayerEntry>,
}

impl LayerTable {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Creates an empty builder configured with this table's settings.
    #[must_use]
    pub fn builder<C: DrawContext>(&self) -> PipelineBuilder<C> {
        PipelineBuilder::with_settings(self.settings.clone())
    }

    /// Registers every entry into `builder`, in table order.
    ///
    /// `bind` supplies the draw function of each entry; returning `None`
    /// fails with [`LayerError::UnboundLayer`]. Loading stops at the first
    /// failing entry. Entries before it stay registered.
    pub fn load_into<C, F>(&self, builder: &mut PipelineBuilder<C>, mut bind: F) -> Result<()>
    where
        C: DrawContext + 'static,
        F: FnMut(&LayerEntry) -> Option<DrawFn<C>>,
    {
        for entry in &self.layers {
            let draw = bind(entry).ok_or_else(|| LayerError::UnboundLayer(entry.name.clone()))?;
            builder.register(
                FnLayer::from_boxed(entry.name.clone(), entry.head_layer, draw),
                entry.position.clone(),
            )?;
        }
        log::debug!("Loaded {} layers from table", self.layers.len());
        Ok(())
    }

    /// Builds and seals a pipeline containing exactly this table's layers.
    pub fn build<C, F>(&self, bind: F) -> Result<Compositor<C>>
    where
        C: DrawContext + 'static,
        F: FnMut(&LayerEntry) -> Option<DrawFn<C>>,
    {
        let mut builder = self.builder::<C>();
        self.load_into(&mut builder, bind)?;
        Ok(builder.build())
    }
}
