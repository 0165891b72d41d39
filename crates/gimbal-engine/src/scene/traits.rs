use glam::Vec2;

use crate::gfx::Painter;
use crate::mvp::Mvp;

/// A node that draws itself.
///
/// Rendering never fails: a node missing its GPU resources draws nothing
/// rather than taking the frame down with it.
pub trait Renderable {
    fn render(&self, mvp: &mut Mvp, painter: &mut dyn Painter);
}

/// A node that can react to click gestures.
pub trait Clickable {
    /// Returns whether the click was handled. The default is "not handled".
    fn handle_click(&mut self, mvp: &mut Mvp, click: Vec2) -> bool {
        let _ = (mvp, click);
        false
    }
}

/// A node that can react to long-press gestures.
pub trait LongPressable {
    /// Returns whether the long press was handled.
    fn handle_long_press(&mut self, mvp: &mut Mvp, press: Vec2) -> bool {
        let _ = (mvp, press);
        false
    }
}

/// A node that can own a drag gesture.
///
/// A node claims the gesture by returning `true` from [`handle_pick_up`];
/// ownership is then sticky — every subsequent drag vector and the final drop
/// are routed to that node exclusively, with no re-entry into the transform
/// stack.
///
/// [`handle_pick_up`]: Draggable::handle_pick_up
pub trait Draggable {
    /// Signals the start of a drag at `touch`.
    fn handle_pick_up(&mut self, mvp: &mut Mvp, touch: Vec2) -> bool {
        let _ = (mvp, touch);
        false
    }

    /// Delivers an incremental move vector to the claiming node.
    fn handle_drag(&mut self, delta: Vec2) -> bool {
        let _ = delta;
        false
    }

    /// Terminates the drag at `drop`.
    fn handle_drop(&mut self, drop: Vec2) -> bool {
        let _ = drop;
        false
    }
}

/// Discrete two-directional swipe signals, delivered directly to top-level
/// content without transform-stack involvement.
pub trait Swipeable {
    fn handle_swipe_left(&mut self) -> bool {
        false
    }

    fn handle_swipe_right(&mut self) -> bool {
        false
    }
}

/// Pinch-zoom signal, delivered directly to top-level content.
pub trait Zoomable {
    /// `factor` is the ratio of post-gesture to pre-gesture zoom levels.
    fn handle_zoom(&mut self, factor: f32) -> bool {
        let _ = factor;
        false
    }
}
