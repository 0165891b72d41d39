//! Coordinate spaces shared by input and rendering.
//!
//! Canonical gesture space:
//! - unit extents (one screen width/height = 1.0)
//! - origin at the screen center
//! - +X right, +Y up
//!
//! Raw window samples are converted into this space exactly once, at input
//! ingestion; nothing downstream re-applies the mapping.

mod viewport;

pub use viewport::Viewport;
