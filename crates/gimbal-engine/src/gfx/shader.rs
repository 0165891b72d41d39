use super::ShaderId;

/// Tracks which shader program is currently active.
///
/// Owned and injected rather than global: whoever drives the rasterizer owns
/// one `ShaderContext` and passes it to whatever needs to activate a program.
/// Activation is idempotent so redundant state changes never reach the GPU.
#[derive(Debug, Default)]
pub struct ShaderContext {
    active: Option<ShaderId>,
}

impl ShaderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `shader` active. Returns `true` if this was an actual switch,
    /// meaning the caller should bind the program on the GPU.
    pub fn activate(&mut self, shader: ShaderId) -> bool {
        if self.active == Some(shader) {
            return false;
        }
        self.active = Some(shader);
        true
    }

    /// Currently active program, if any.
    pub fn active(&self) -> Option<ShaderId> {
        self.active
    }

    /// Forgets the active program, e.g. after the GL context is lost.
    pub fn invalidate(&mut self) {
        self.active = None;
    }
}
