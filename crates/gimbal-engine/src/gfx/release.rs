use std::sync::Mutex;

use super::TextureId;

/// Deferred GPU handle destruction.
///
/// GPU handles must be released on the rendering thread. Any thread may
/// defer a handle; the render callback drains the queue at a safe point in
/// its frame. This is the one mandatory cross-thread handoff in the engine.
#[derive(Debug, Default)]
pub struct ReleaseQueue {
    pending: Mutex<Vec<TextureId>>,
}

impl ReleaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `texture` for release. Callable from any thread.
    pub fn defer(&self, texture: TextureId) {
        self.pending.lock().unwrap().push(texture);
        log::debug!("deferred release of {texture}");
    }

    /// Releases every pending handle through `release`.
    ///
    /// Must be called from the rendering thread.
    pub fn drain(&self, mut release: impl FnMut(TextureId)) {
        let drained: Vec<TextureId> = std::mem::take(&mut *self.pending.lock().unwrap());
        for texture in drained {
            release(texture);
        }
    }

    /// Number of handles waiting for release.
    pub fn pending_len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }
}
