//! Gimbal widget layer.
//!
//! Everything here is a consumer of the engine's transform-stack discipline:
//! widgets enter their object space through [`Placement::enter`], test
//! containment against the collapsed transform, and delegate to embedded
//! content before claiming a gesture themselves.
//!
//! [`Placement::enter`]: gimbal_engine::scene::Placement::enter

pub mod host;
pub mod lifecycle;
pub mod widgets;

pub use host::{Scene, SceneHost};
pub use lifecycle::LifecycleDriver;
