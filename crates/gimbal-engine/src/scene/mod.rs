//! Scene-node traversal building blocks.
//!
//! There is no common widget base type. Widgets implement the capability
//! traits they actually support and compose children by delegation: every
//! node re-derives its placement from the ancestor's model top, pushes,
//! recurses, and pops. [`Placement::enter`] encapsulates that discipline.

mod placement;
mod traits;

pub use placement::{Placement, PlacementError};
pub use traits::{Clickable, Draggable, LongPressable, Renderable, Swipeable, Zoomable};
