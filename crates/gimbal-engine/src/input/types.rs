/// Phase of a raw pointer sample.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Raw pointer sample in window pixels (origin top-left, +Y down).
///
/// The dispatcher owns the conversion into gesture space; platform code
/// never normalizes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
}

impl PointerSample {
    #[inline]
    pub const fn new(x: f32, y: f32, phase: PointerPhase) -> Self {
        Self { x, y, phase }
    }
}
