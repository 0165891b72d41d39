use glam::{Mat4, Vec2};
use thiserror::Error;

use crate::mvp::Mvp;

/// Raised when a caller tries to degenerate a node's transform.
#[derive(Debug, Error, Copy, Clone, PartialEq)]
pub enum PlacementError {
    /// Size components must be strictly positive; a zero or negative scale
    /// would make both hit-testing and aspect correction meaningless.
    #[error("size components must be > 0, got ({0}, {1})")]
    InvalidSize(f32, f32),
}

/// Position and size of a node in its ancestor's object space.
///
/// `Placement` is `Copy` so a widget can lift it out of `&mut self` before
/// entering object space:
///
/// ```rust,ignore
/// fn handle_click(&mut self, mvp: &mut Mvp, click: Vec2) -> bool {
///     self.placement.enter(mvp, |mvp| {
///         hit::is_touched(mvp, click) && self.activate()
///     })
/// }
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    position: Vec2,
    size: Vec2,
}

impl Placement {
    /// Placement at the ancestor's origin with unit size.
    pub const fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ONE,
        }
    }

    /// Convenience constructor; fails like [`set_size`].
    ///
    /// [`set_size`]: Placement::set_size
    pub fn at(position: Vec2, size: Vec2) -> Result<Self, PlacementError> {
        let mut placement = Self::new();
        placement.set_position(position);
        placement.set_size(size)?;
        Ok(placement)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Moves the node by `delta` in ancestor space. Used by drag owners.
    #[inline]
    pub fn translate_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Sets the node's size; both components must be strictly positive.
    pub fn set_size(&mut self, size: Vec2) -> Result<(), PlacementError> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(PlacementError::InvalidSize(size.x, size.y));
        }
        self.size = size;
        Ok(())
    }

    /// The node's local transform: translate by position, then scale by size.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position.extend(0.0))
            * Mat4::from_scale(self.size.extend(1.0))
    }

    /// Runs `f` inside this node's object space.
    ///
    /// Copies the ancestor's model top, applies the local transform, and
    /// delegates through [`Mvp::with_model`], so stack depth is restored on
    /// every exit path — early returns and unwinds included.
    pub fn enter<R>(&self, mvp: &mut Mvp, f: impl FnOnce(&mut Mvp) -> R) -> R {
        let derived = mvp.peek_copy_model() * self.local_matrix();
        mvp.with_model(derived, f)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new()
    }
}
