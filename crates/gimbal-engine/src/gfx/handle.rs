use std::fmt;

use thiserror::Error;

/// Opaque GPU texture handle.
///
/// Valid until explicitly invalidated through the release queue; the engine
/// never inspects the integer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque GPU shader-program handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

impl fmt::Display for ShaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader#{}", self.0)
    }
}

/// Resource acquisition failures.
///
/// Fatal to the affected draw call only: the widget in error state renders
/// as a no-op instead of crashing the frame loop, and nothing is retried
/// automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("texture allocation failed for {0}")]
    TextureAllocation(String),
}

/// Loads GPU-resident resources from opaque asset identifiers.
///
/// Implemented by the host's asset layer. Rasterizing a label produces a
/// *new* texture each time; the previous handle stays valid until the caller
/// defers its release.
pub trait ResourceLoader {
    /// Loads the texture for `asset`.
    fn load_texture(&mut self, asset: &str) -> Result<TextureId, ResourceError>;

    /// Rasterizes `text` into a fresh texture and returns its handle along
    /// with the rendered width in text-height units.
    fn rasterize_label(&mut self, text: &str) -> Result<(TextureId, f32), ResourceError>;
}
