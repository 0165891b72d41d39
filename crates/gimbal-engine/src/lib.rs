//! Gimbal engine crate.
//!
//! This crate owns the transform-stack, hit-test, input, and flow-loop
//! machinery used by higher layers. Window and GPU plumbing stays outside;
//! the engine talks to it through the traits in [`gfx`] and [`flow`].

pub mod coords;
pub mod events;
pub mod flow;
pub mod gfx;
pub mod hit;
pub mod input;
pub mod logging;
pub mod mvp;
pub mod scene;
