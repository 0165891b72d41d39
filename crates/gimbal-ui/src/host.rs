use glam::Mat4;

use gimbal_engine::coords::Viewport;
use gimbal_engine::gfx::Painter;
use gimbal_engine::mvp::Mvp;
use gimbal_engine::scene::{
    Clickable, Draggable, LongPressable, Renderable, Swipeable, Zoomable,
};

/// A top-level content unit the host can activate.
///
/// One scene is active at a time; the host forwards every gesture and frame
/// to it. Scenes implement the capability methods they care about — the
/// defaults leave everything unhandled.
pub trait Scene:
    Renderable + Clickable + LongPressable + Draggable + Swipeable + Zoomable + Send
{
}

/// Routes rendering and input to the currently active scene.
///
/// `draw_frame` must be called from the host surface's frame callback:
/// exactly one root traversal per frame, on the rendering thread. Gestures
/// arrive on the input thread through the capability impls below; each call
/// carries its own private transform stack, so the two never share one.
pub struct SceneHost {
    active: Box<dyn Scene>,
    viewport: Viewport,
}

impl SceneHost {
    pub fn new(active: Box<dyn Scene>, viewport: Viewport) -> Self {
        Self { active, viewport }
    }

    /// Called when the surface reports its size (creation and resize).
    pub fn on_surface_ready(&mut self, width: f32, height: f32) {
        log::debug!("surface ready: {width}x{height}");
        self.viewport = Viewport::new(width, height);
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Swaps the active scene, returning the previous one so the caller can
    /// route its GPU cleanup through the release queue.
    pub fn set_active(&mut self, scene: Box<dyn Scene>) -> Box<dyn Scene> {
        std::mem::replace(&mut self.active, scene)
    }

    /// Renders one frame: traverse inside a scoped screen-projection push.
    pub fn draw_frame(&mut self, painter: &mut dyn Painter) {
        let mut mvp = Mvp::new();
        mvp.with_projection(screen_projection(), |mvp| {
            self.active.render(mvp, painter);
        });
        debug_assert_eq!(mvp.model_depth(), 1, "render traversal leaked a model matrix");
    }
}

/// Orthographic projection over the unit screen box.
///
/// Gesture dispatch keeps the identity projection: hit containment is decided
/// in the model chain, which render and hit-test share.
fn screen_projection() -> Mat4 {
    Mat4::orthographic_rh(-0.5, 0.5, -0.5, 0.5, -1.0, 1.0)
}

impl Clickable for SceneHost {
    fn handle_click(&mut self, mvp: &mut Mvp, click: glam::Vec2) -> bool {
        self.active.handle_click(mvp, click)
    }
}

impl LongPressable for SceneHost {
    fn handle_long_press(&mut self, mvp: &mut Mvp, press: glam::Vec2) -> bool {
        self.active.handle_long_press(mvp, press)
    }
}

impl Draggable for SceneHost {
    fn handle_pick_up(&mut self, mvp: &mut Mvp, touch: glam::Vec2) -> bool {
        self.active.handle_pick_up(mvp, touch)
    }

    fn handle_drag(&mut self, delta: glam::Vec2) -> bool {
        self.active.handle_drag(delta)
    }

    fn handle_drop(&mut self, drop: glam::Vec2) -> bool {
        self.active.handle_drop(drop)
    }
}

impl Swipeable for SceneHost {
    fn handle_swipe_left(&mut self) -> bool {
        self.active.handle_swipe_left()
    }

    fn handle_swipe_right(&mut self) -> bool {
        self.active.handle_swipe_right()
    }
}

impl Zoomable for SceneHost {
    fn handle_zoom(&mut self, factor: f32) -> bool {
        self.active.handle_zoom(factor)
    }
}
