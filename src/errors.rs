//! Error Types
//!
//! This module defines the error types used by the layer pipeline.
//!
//! # Overview
//!
//! The main error type [`LayerError`] covers every failure of the load phase:
//! - Registry failures (duplicate or unknown layer names)
//! - Relative-position failures (missing anchors, non-adjacent `Between` anchors)
//! - Layer table failures (malformed JSON, entries without a draw action)
//!
//! Failures raised while a frame is composited are *not* represented here.
//! They use the error type of the host's [`DrawContext`](crate::layer::DrawContext)
//! and are returned unchanged.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stratum::errors::{LayerError, Result};
//!
//! fn install(builder: &mut PipelineBuilder<MyContext>) -> Result<()> {
//!     builder.register(Box::new(Cape::default()), Position::after("Torso"))?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for layer registration and loading.
#[derive(Error, Debug)]
pub enum LayerError {
    // ========================================================================
    // Registry Errors
    // ========================================================================
    /// A layer with this name is already registered.
    #[error("Layer '{0}' is already registered")]
    DuplicateName(String),

    /// No layer with this name is registered.
    #[error("Layer '{0}' not found")]
    NotFound(String),

    // ========================================================================
    // Position Errors
    // ========================================================================
    /// A relative position referenced a layer that is not registered (yet).
    #[error("Cannot place layer '{layer}': anchor '{anchor}' is not registered")]
    AnchorNotFound {
        /// The layer being registered
        layer: String,
        /// The missing anchor
        anchor: String,
    },

    /// A `Between` position named two layers that are not adjacent.
    #[error("Cannot place layer '{layer}' between '{first}' and '{second}': anchors are not adjacent")]
    Adjacency {
        /// The layer being registered
        layer: String,
        /// The first anchor
        first: String,
        /// The second anchor
        second: String,
    },

    // ========================================================================
    // Layer Table Errors
    // ========================================================================
    /// The host supplied no draw action for a layer table entry.
    #[error("Layer table entry '{0}' has no draw action bound")]
    UnboundLayer(String),

    /// The layer table could not be parsed.
    #[error("Layer table parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias for `Result<T, LayerError>`.
pub type Result<T> = std::result::Result<T, LayerError>;
