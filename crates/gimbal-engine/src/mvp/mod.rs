//! Model-view-projection matrix stacks.
//!
//! Model and view are treated as one chain; projection is stacked
//! independently so a renderer can switch to screen space (HUD overlays)
//! without disturbing the nested object-space chain.

mod stack;

pub use stack::{MATRIX_SIZE, Mvp, TransformError};
