//! Hit-test evaluator.
//!
//! Containment is decided from the *same* collapsed matrix used for drawing,
//! so the render path and the hit-test path can never diverge.
//!
//! The test reads the object's center from the translation cells and its
//! width/height from the scale cells of the collapsed column-major matrix.
//! Widgets never rotate, so the axis-aligned read is exact.

use glam::{Mat4, Vec2};

use crate::mvp::Mvp;

/// Tests whether `touch` falls inside the object frame described by the
/// collapsed tops of `mvp`.
#[inline]
pub fn is_touched(mvp: &Mvp, touch: Vec2) -> bool {
    is_touched_mat(&mvp.collapse(), touch)
}

/// Tests containment against an already-collapsed transform.
pub fn is_touched_mat(collapsed: &Mat4, touch: Vec2) -> bool {
    let center = Vec2::new(collapsed.w_axis.x, collapsed.w_axis.y);
    let size = Vec2::new(collapsed.x_axis.x, collapsed.y_axis.y);
    is_touched_rect(center, size, touch)
}

/// Axis-aligned bounding test with inclusive bounds, for callers that already
/// know their object frame.
pub fn is_touched_rect(center: Vec2, size: Vec2, touch: Vec2) -> bool {
    (center.x - size.x / 2.0 <= touch.x)
        && (center.x + size.x / 2.0 >= touch.x)
        && (center.y - size.y / 2.0 <= touch.y)
        && (center.y + size.y / 2.0 >= touch.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn placed(position: Vec2, size: Vec2) -> Mvp {
        let mut mvp = Mvp::new();
        let local = Mat4::from_translation(position.extend(0.0))
            * Mat4::from_scale(size.extend(1.0));
        mvp.push_model(local);
        mvp
    }

    // ── containment ───────────────────────────────────────────────────────

    #[test]
    fn center_is_always_touched() {
        let mvp = placed(Vec2::new(0.2, 0.0), Vec2::new(0.4, 0.4));
        assert!(is_touched(&mvp, Vec2::new(0.2, 0.0)));
    }

    #[test]
    fn edges_are_inclusive() {
        let mvp = placed(Vec2::ZERO, Vec2::new(0.4, 0.4));
        assert!(is_touched(&mvp, Vec2::new(0.2, 0.0)));
        assert!(is_touched(&mvp, Vec2::new(-0.2, 0.0)));
        assert!(is_touched(&mvp, Vec2::new(0.0, 0.2)));
        assert!(is_touched(&mvp, Vec2::new(0.0, -0.2)));
    }

    #[test]
    fn beyond_the_half_extent_is_never_touched() {
        let mvp = placed(Vec2::new(0.2, 0.0), Vec2::new(0.4, 0.4));
        for eps in [1e-6, 1e-3, 0.1, 10.0] {
            assert!(!is_touched(&mvp, Vec2::new(0.2 + 0.2 + eps, 0.0)));
        }
    }

    #[test]
    fn hit_boundary_around_an_offset_node() {
        // Node at (0.2, 0) with size (0.4, 0.4): (0.2, 0) hits, (0.5, 0) does not.
        let mvp = placed(Vec2::new(0.2, 0.0), Vec2::new(0.4, 0.4));
        assert!(is_touched(&mvp, Vec2::new(0.2, 0.0)));
        assert!(!is_touched(&mvp, Vec2::new(0.5, 0.0)));
    }

    // ── render / hit-test consistency ─────────────────────────────────────

    #[test]
    fn nested_transforms_shift_the_hit_area() {
        let mut mvp = Mvp::new();
        mvp.push_model(Mat4::from_translation(Vec3::new(0.5, 0.5, 0.0)));

        let child = mvp.peek_copy_model()
            * Mat4::from_translation(Vec3::new(0.1, 0.0, 0.0))
            * Mat4::from_scale(Vec3::new(0.2, 0.2, 1.0));
        mvp.push_model(child);

        // Child center in root space is (0.6, 0.5).
        assert!(is_touched(&mvp, Vec2::new(0.6, 0.5)));
        assert!(!is_touched(&mvp, Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn projection_scale_participates_in_the_test() {
        let mut mvp = Mvp::new();
        mvp.push_projection(Mat4::from_scale(Vec3::new(0.5, 1.0, 1.0)));
        mvp.push_model(
            Mat4::from_translation(Vec3::new(0.4, 0.0, 0.0))
                * Mat4::from_scale(Vec3::new(0.4, 0.4, 1.0)),
        );

        // Projection halves x: center 0.2, half-width 0.1.
        assert!(is_touched(&mvp, Vec2::new(0.25, 0.0)));
        assert!(!is_touched(&mvp, Vec2::new(0.35, 0.0)));
    }
}
