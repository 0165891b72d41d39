use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::Vec2;

use crate::coords::Viewport;
use crate::mvp::Mvp;
use crate::scene::{Clickable, Draggable, LongPressable, Swipeable, Zoomable};

use super::press_timer::PressTimer;
use super::types::{PointerPhase, PointerSample};

/// Gesture classification thresholds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DispatcherConfig {
    /// How far a touch must move, in gesture-space units, before the gesture
    /// becomes a drag.
    pub drag_activation_distance: f32,

    /// How long a touch must hold still before it becomes a long press.
    pub long_press_delay: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            drag_activation_distance: 0.025,
            long_press_delay: Duration::from_millis(500),
        }
    }
}

/// Per-touch classification state, live between down and up.
struct ActiveGesture {
    /// Where the touch went down; pick-up claims are made here.
    down_point: Vec2,

    /// Last recorded sample; drag vectors are measured from it.
    last_point: Vec2,

    /// Once true, never reverts within the gesture.
    is_dragging: bool,

    /// Set when a cancelled timer reports it had already fired.
    long_press_fired: bool,

    timer: Option<PressTimer>,
}

/// Classifies raw pointer samples into click / long-press / drag / drop and
/// routes each into the scene root.
///
/// Exactly one of {click, drag, long-press} terminates a down-to-up
/// sequence. Every traversal into the scene uses a fresh [`Mvp`], so the
/// render thread and the input thread never share a stack.
pub struct GestureDispatcher<S> {
    scene: Arc<Mutex<S>>,
    viewport: Viewport,
    config: DispatcherConfig,
    gesture: Option<ActiveGesture>,
}

impl<S> GestureDispatcher<S>
where
    S: Clickable + LongPressable + Draggable + Send + 'static,
{
    pub fn new(scene: Arc<Mutex<S>>, viewport: Viewport, config: DispatcherConfig) -> Self {
        Self {
            scene,
            viewport,
            config,
            gesture: None,
        }
    }

    /// Updates the window-to-gesture-space mapping after a resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Ingests one raw pointer sample.
    ///
    /// Normalization into gesture space happens here and only here.
    pub fn handle_pointer(&mut self, sample: PointerSample) -> bool {
        let point = self.viewport.normalize(sample.x, sample.y);

        match sample.phase {
            PointerPhase::Down => self.on_down(point),
            PointerPhase::Move => self.on_move(point),
            PointerPhase::Up => self.on_up(point),
        }
    }

    /// Forwards a discrete swipe straight to the scene, no transform stack.
    pub fn handle_swipe_left(&mut self) -> bool
    where
        S: Swipeable,
    {
        self.scene.lock().unwrap().handle_swipe_left()
    }

    /// Forwards a discrete swipe straight to the scene, no transform stack.
    pub fn handle_swipe_right(&mut self) -> bool
    where
        S: Swipeable,
    {
        self.scene.lock().unwrap().handle_swipe_right()
    }

    /// Forwards a pinch-zoom factor straight to the scene.
    pub fn handle_zoom(&mut self, factor: f32) -> bool
    where
        S: Zoomable,
    {
        self.scene.lock().unwrap().handle_zoom(factor)
    }

    fn on_down(&mut self, point: Vec2) -> bool {
        // A second down while a gesture is live replaces it; this dispatcher
        // tracks one pointer at a time.
        if let Some(mut stale) = self.gesture.take() {
            if let Some(mut timer) = stale.timer.take() {
                let _ = timer.cancel();
            }
        }

        let timer = PressTimer::arm(
            Arc::clone(&self.scene),
            point,
            self.config.long_press_delay,
        );

        self.gesture = Some(ActiveGesture {
            down_point: point,
            last_point: point,
            is_dragging: false,
            long_press_fired: false,
            timer: Some(timer),
        });
        true
    }

    fn on_move(&mut self, point: Vec2) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };

        let beyond_threshold =
            gesture.last_point.distance(point) > self.config.drag_activation_distance;
        if !gesture.is_dragging && !beyond_threshold {
            return false;
        }

        // Movement rules out a long press.
        if let Some(mut timer) = gesture.timer.take() {
            gesture.long_press_fired = timer.cancel();
        }

        if !gesture.is_dragging {
            // First activation: offer the pick-up at the down location.
            let down = gesture.down_point;
            gesture.is_dragging = self
                .scene
                .lock()
                .unwrap()
                .handle_pick_up(&mut Mvp::new(), down);
        }

        let delta = point - gesture.last_point;
        gesture.last_point = point;

        if gesture.is_dragging {
            return self.scene.lock().unwrap().handle_drag(delta);
        }
        false
    }

    fn on_up(&mut self, point: Vec2) -> bool {
        let Some(mut gesture) = self.gesture.take() else {
            return false;
        };

        let mut fired = gesture.long_press_fired;
        if let Some(mut timer) = gesture.timer.take() {
            fired |= timer.cancel();
        }

        if fired {
            // Already consumed as a long press; nothing further to dispatch.
            return true;
        }
        if gesture.is_dragging {
            return self.scene.lock().unwrap().handle_drop(point);
        }
        self.scene
            .lock()
            .unwrap()
            .handle_click(&mut Mvp::new(), point)
    }
}
