use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec2;

use gimbal_engine::events::{EngineEvent, EventBus, Subscription};
use gimbal_engine::gfx::{Painter, ReleaseQueue, ResourceLoader};
use gimbal_engine::mvp::Mvp;
use gimbal_engine::scene::Renderable;

use super::Label;

/// On-screen readout of the simulation tick rate.
///
/// Tick events are counted on whatever thread posts them; `refresh` runs on
/// the render thread once per second, folds the count into a running average,
/// and re-rasterizes the label only when the displayed integer changes.
pub struct TickMeter {
    label: Label,
    ticks: Arc<AtomicU32>,
    smoothed: f32,
    shown: Option<u32>,
    _subscription: Subscription,
}

impl TickMeter {
    pub fn new(bus: &Arc<EventBus>) -> Self {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&ticks);
        let subscription = bus.subscribe(move |event| {
            if let EngineEvent::Tick { .. } = event {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        });

        let mut label = Label::new();
        let _ = label.set_height(0.05);

        Self {
            label,
            ticks,
            smoothed: 0.0,
            shown: None,
            _subscription: subscription,
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.label.set_position(position);
    }

    /// Folds the ticks observed since the last call into the average.
    pub fn refresh(&mut self, loader: &mut dyn ResourceLoader, releases: &ReleaseQueue) {
        let observed = self.ticks.swap(0, Ordering::Relaxed) as f32;
        self.smoothed = match self.shown {
            None => observed,
            Some(_) => self.smoothed * 0.9 + observed * 0.1,
        };

        let rounded = self.smoothed.round() as u32;
        if self.shown != Some(rounded) {
            self.shown = Some(rounded);
            self.label
                .set_text(&format!("{rounded} tps"), loader, releases);
        }
    }
}

impl Renderable for TickMeter {
    fn render(&self, mvp: &mut Mvp, painter: &mut dyn Painter) {
        self.label.render(mvp, painter);
    }
}
