use glam::{Mat4, Vec2, Vec3};

use gimbal_engine::gfx::{Painter, ReleaseQueue, ResourceLoader, TextureId};
use gimbal_engine::hit;
use gimbal_engine::mvp::Mvp;
use gimbal_engine::scene::{Clickable, Placement, PlacementError, Renderable};

use super::Label;

/// A click target with an optional background texture and a caption.
///
/// The action closure returns whether it consumed the click, so a disabled
/// button can decline and let the gesture fall through to whatever sits
/// behind it.
pub struct Button {
    placement: Placement,
    background: Option<TextureId>,
    label: Label,
    on_click: Box<dyn FnMut() -> bool + Send>,
}

impl Button {
    pub fn new(
        background: Option<TextureId>,
        on_click: impl FnMut() -> bool + Send + 'static,
    ) -> Self {
        let mut label = Label::new();
        // Caption fills about a quarter of the button's height.
        let _ = label.set_height(0.27);
        Self {
            placement: Placement::new(),
            background,
            label,
            on_click: Box::new(on_click),
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.placement.set_position(position);
    }

    pub fn set_size(&mut self, size: Vec2) -> Result<(), PlacementError> {
        self.placement.set_size(size)
    }

    pub fn set_caption(
        &mut self,
        text: &str,
        loader: &mut dyn ResourceLoader,
        releases: &ReleaseQueue,
    ) {
        self.label.set_text(text, loader, releases);
    }

    /// Fires the action as if the button had been clicked.
    pub fn activate(&mut self) -> bool {
        (self.on_click)()
    }
}

impl Renderable for Button {
    fn render(&self, mvp: &mut Mvp, painter: &mut dyn Painter) {
        self.placement.enter(mvp, |mvp| {
            if let Some(background) = self.background {
                painter.draw_textured(&mvp.collapse().to_cols_array(), background);
            }

            // Object space is squashed to the button's aspect; undo that for
            // the caption so its glyphs keep square proportions.
            let size = self.placement.size();
            let squared =
                mvp.peek_copy_model() * Mat4::from_scale(Vec3::new(size.y / size.x, 1.0, 1.0));
            mvp.with_model(squared, |mvp| self.label.render(mvp, painter));
        });
    }
}

impl Clickable for Button {
    fn handle_click(&mut self, mvp: &mut Mvp, click: Vec2) -> bool {
        let placement = self.placement;
        placement.enter(mvp, |mvp| {
            if !hit::is_touched(mvp, click) {
                return false;
            }
            (self.on_click)()
        })
    }
}
