use glam::Vec2;

use gimbal_engine::gfx::{Painter, TextureId};
use gimbal_engine::hit;
use gimbal_engine::mvp::Mvp;
use gimbal_engine::scene::{Clickable, Placement, PlacementError, Renderable};

/// A two-state toggle. Clicking inside flips the state and notifies the
/// observer; the textures are swapped per state.
pub struct Checkbox {
    placement: Placement,
    checked: bool,
    checked_texture: Option<TextureId>,
    unchecked_texture: Option<TextureId>,
    on_toggle: Option<Box<dyn FnMut(bool) + Send>>,
}

impl Checkbox {
    pub fn new(checked_texture: Option<TextureId>, unchecked_texture: Option<TextureId>) -> Self {
        Self {
            placement: Placement::new(),
            checked: false,
            checked_texture,
            unchecked_texture,
            on_toggle: None,
        }
    }

    pub fn on_toggle(mut self, observer: impl FnMut(bool) + Send + 'static) -> Self {
        self.on_toggle = Some(Box::new(observer));
        self
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.placement.set_position(position);
    }

    pub fn set_size(&mut self, size: Vec2) -> Result<(), PlacementError> {
        self.placement.set_size(size)
    }

    #[inline]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the state without notifying the observer.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    fn toggle(&mut self) {
        self.checked = !self.checked;
        if let Some(observer) = self.on_toggle.as_mut() {
            observer(self.checked);
        }
    }
}

impl Renderable for Checkbox {
    fn render(&self, mvp: &mut Mvp, painter: &mut dyn Painter) {
        let texture = if self.checked {
            self.checked_texture
        } else {
            self.unchecked_texture
        };
        let Some(texture) = texture else {
            return;
        };
        self.placement.enter(mvp, |mvp| {
            painter.draw_textured(&mvp.collapse().to_cols_array(), texture);
        });
    }
}

impl Clickable for Checkbox {
    fn handle_click(&mut self, mvp: &mut Mvp, click: Vec2) -> bool {
        let placement = self.placement;
        placement.enter(mvp, |mvp| {
            if !hit::is_touched(mvp, click) {
                return false;
            }
            self.toggle();
            true
        })
    }
}
