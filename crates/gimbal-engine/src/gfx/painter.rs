use crate::mvp::MATRIX_SIZE;

use super::TextureId;

/// Straight-alpha RGBA color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const PANEL_GRAY: Color = Color::new(0.3, 0.3, 0.3, 0.9);
}

/// Rasterizer seam.
///
/// Widgets hand a collapsed column-major matrix plus either a texture handle
/// or a flat color; the host's renderer turns each call into a unit-square
/// draw. Implementations must not fail — a draw with a stale handle is the
/// host's no-op, not the engine's error.
pub trait Painter {
    fn draw_textured(&mut self, collapsed: &[f32; MATRIX_SIZE], texture: TextureId);

    fn draw_colored(&mut self, collapsed: &[f32; MATRIX_SIZE], color: Color);
}
