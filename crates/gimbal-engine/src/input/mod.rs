//! Input subsystem.
//!
//! The platform layer delivers raw pointer samples in window pixels; the
//! dispatcher normalizes them exactly once, classifies the gesture, and
//! routes it into the scene through a fresh transform stack per traversal.

mod dispatcher;
mod press_timer;
mod types;

pub use dispatcher::{DispatcherConfig, GestureDispatcher};
pub use press_timer::PressTimer;
pub use types::{PointerPhase, PointerSample};
