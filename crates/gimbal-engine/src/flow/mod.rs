//! Fixed-tick update/render flow.
//!
//! One dedicated thread drives "update N times, render once" cycles at a
//! configured tick rate with bounded catch-up. Renders are requested
//! asynchronously through [`RenderSurface`]; ticks fan out on the engine
//! event bus.

mod clock;
mod controller;

pub use clock::{Clock, SystemClock};
pub use controller::{FlowConfig, FlowConfigError, FlowController, RenderSurface};
