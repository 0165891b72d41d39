use glam::Vec2;

use gimbal_engine::gfx::{Painter, ReleaseQueue, ResourceLoader, TextureId};
use gimbal_engine::mvp::Mvp;
use gimbal_engine::scene::{Placement, PlacementError, Renderable};

/// A line of rasterized text.
///
/// Setting the text produces a fresh texture; the stale handle is routed
/// through the release queue so its destruction happens on the rendering
/// thread. A label whose rasterization failed (or that was cleared) renders
/// as a no-op — invisible, never a crashed frame.
pub struct Label {
    placement: Placement,
    text: String,
    height: f32,
    /// Rendered width per unit of height; comes from the rasterizer.
    aspect: f32,
    texture: Option<TextureId>,
}

impl Label {
    pub fn new() -> Self {
        Self {
            placement: Placement::new(),
            text: String::new(),
            height: 1.0,
            aspect: 1.0,
            texture: None,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width in ancestor units at the current height.
    #[inline]
    pub fn width(&self) -> f32 {
        self.height * self.aspect
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.placement.set_position(position);
    }

    /// Text height in ancestor units; must be strictly positive.
    pub fn set_height(&mut self, height: f32) -> Result<(), PlacementError> {
        self.placement
            .set_size(Vec2::new(height * self.aspect, height))?;
        self.height = height;
        Ok(())
    }

    /// Replaces the text, re-rasterizing into a new texture.
    ///
    /// The previous handle, if any, is deferred for release. On rasterizer
    /// failure the label keeps the new text but goes invisible.
    pub fn set_text(
        &mut self,
        text: &str,
        loader: &mut dyn ResourceLoader,
        releases: &ReleaseQueue,
    ) {
        if self.text == text {
            return;
        }
        self.text = text.to_owned();

        let old = self.texture.take();
        match loader.rasterize_label(text) {
            Ok((texture, aspect)) => {
                self.texture = Some(texture);
                if aspect > 0.0 {
                    self.aspect = aspect;
                    let _ = self
                        .placement
                        .set_size(Vec2::new(self.width(), self.height));
                }
            }
            Err(err) => {
                log::warn!("label rasterization failed for {text:?}: {err}");
            }
        }
        if let Some(old) = old {
            releases.defer(old);
        }
    }

    /// Explicit GPU cleanup; the label stays usable and re-rasterizes on the
    /// next `set_text`.
    pub fn clear(&mut self, releases: &ReleaseQueue) {
        if let Some(texture) = self.texture.take() {
            releases.defer(texture);
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderable for Label {
    fn render(&self, mvp: &mut Mvp, painter: &mut dyn Painter) {
        let Some(texture) = self.texture else {
            return;
        };
        self.placement.enter(mvp, |mvp| {
            painter.draw_textured(&mvp.collapse().to_cols_array(), texture);
        });
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{RecordingPainter, StubLoader};
    use super::*;

    #[test]
    fn empty_label_renders_nothing() {
        let label = Label::new();
        let mut painter = RecordingPainter::default();
        let mut mvp = Mvp::new();

        label.render(&mut mvp, &mut painter);

        assert!(painter.textured.is_empty());
        assert_eq!(mvp.model_depth(), 1);
    }

    #[test]
    fn set_text_rasterizes_and_renders() {
        let mut label = Label::new();
        let mut loader = StubLoader::new();
        let releases = ReleaseQueue::new();

        label.set_text("hi", &mut loader, &releases);
        assert_eq!(label.width(), 1.0); // 2 chars * 0.5 per char * height 1.0

        let mut painter = RecordingPainter::default();
        label.render(&mut Mvp::new(), &mut painter);
        assert_eq!(painter.textured, vec![TextureId(1)]);
    }

    #[test]
    fn replacing_text_defers_the_old_handle() {
        let mut label = Label::new();
        let mut loader = StubLoader::new();
        let releases = ReleaseQueue::new();

        label.set_text("one", &mut loader, &releases);
        label.set_text("two", &mut loader, &releases);

        let mut released = Vec::new();
        releases.drain(|t| released.push(t));
        assert_eq!(released, vec![TextureId(1)]);
    }

    #[test]
    fn unchanged_text_does_not_reallocate() {
        let mut label = Label::new();
        let mut loader = StubLoader::new();
        let releases = ReleaseQueue::new();

        label.set_text("same", &mut loader, &releases);
        label.set_text("same", &mut loader, &releases);

        assert_eq!(loader.next, 2); // a single allocation
        assert_eq!(releases.pending_len(), 0);
    }

    #[test]
    fn failed_rasterization_goes_invisible_not_fatal() {
        let mut label = Label::new();
        let mut loader = StubLoader::new();
        let releases = ReleaseQueue::new();

        label.set_text("ok", &mut loader, &releases);
        loader.fail = true;
        label.set_text("broken", &mut loader, &releases);

        let mut painter = RecordingPainter::default();
        label.render(&mut Mvp::new(), &mut painter);
        assert!(painter.textured.is_empty());

        // The stale handle still gets released.
        assert_eq!(releases.pending_len(), 1);
    }

    #[test]
    fn set_height_rejects_non_positive_values() {
        let mut label = Label::new();
        assert!(label.set_height(0.0).is_err());
        assert!(label.set_height(0.27).is_ok());
    }

    #[test]
    fn clear_defers_the_texture() {
        let mut label = Label::new();
        let mut loader = StubLoader::new();
        let releases = ReleaseQueue::new();

        label.set_text("gone", &mut loader, &releases);
        label.clear(&releases);

        assert_eq!(releases.pending_len(), 1);
        let mut painter = RecordingPainter::default();
        label.render(&mut Mvp::new(), &mut painter);
        assert!(painter.textured.is_empty());
    }
}
