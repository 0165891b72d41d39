//! Cross-cutting engine notifications.
//!
//! The engine emits ticks and expects pause/resume from the host. Observer
//! registration is explicit and scoped: dropping the [`Subscription`]
//! unregisters, so a widget's subscription lives exactly as long as the
//! widget does.

mod bus;

pub use bus::{EngineEvent, EventBus, Subscription};
