use glam::Vec2;

/// Surface size in raw window pixels.
///
/// Owns the window-to-gesture-space mapping so it lives in exactly one place.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height. Used for aspect correction in widget transforms.
    #[inline]
    pub fn aspect_ratio(self) -> f32 {
        self.width / self.height
    }

    /// Maps a raw window sample (origin top-left, +Y down, pixels) into unit,
    /// origin-centered, y-up gesture space.
    ///
    /// Applied once at ingestion — never downstream.
    pub fn normalize(self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x - self.width / 2.0) / self.width,
            (self.height / 2.0 - y) / self.height,
        )
    }

    /// Maps a unit-space point back to raw window pixels.
    ///
    /// Inverse of [`normalize`]; used when handing positions back to the
    /// platform layer.
    pub fn to_window(self, point: Vec2) -> Vec2 {
        Vec2::new(
            (point.x + 0.5) * self.width,
            (-point.y + 0.5) * self.height,
        )
    }
}
