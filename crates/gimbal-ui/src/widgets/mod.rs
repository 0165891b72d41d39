//! Concrete widgets.
//!
//! Each widget implements only the capability traits it supports and keeps
//! the traversal contract: copy the ancestor top, apply its own placement,
//! delegate, pop — stack depth is identical before and after every handler.

mod button;
mod checkbox;
mod label;
mod panel;
mod tick_meter;

pub use button::Button;
pub use checkbox::Checkbox;
pub use label::Label;
pub use panel::{DockablePanel, PanelSide};
pub use tick_meter::TickMeter;
