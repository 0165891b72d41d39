use std::sync::{Arc, Mutex};

use gimbal_engine::events::{EngineEvent, EventBus, Subscription};
use gimbal_engine::flow::FlowController;

/// Ties the flow loop to the host's pause/resume lifecycle.
///
/// A `Pause` on the bus stops the loop (joining its thread); a `Resume`
/// starts it again. The subscription lives exactly as long as the driver, so
/// tearing the driver down also detaches it from the bus.
pub struct LifecycleDriver {
    controller: Arc<Mutex<FlowController>>,
    _subscription: Subscription,
}

impl LifecycleDriver {
    pub fn new(controller: FlowController, bus: &Arc<EventBus>) -> Self {
        let controller = Arc::new(Mutex::new(controller));

        let observed = Arc::clone(&controller);
        let subscription = bus.subscribe(move |event| {
            match event {
                EngineEvent::Pause => {
                    log::info!("pause received, stopping flow loop");
                    observed.lock().unwrap().stop();
                }
                EngineEvent::Resume => {
                    log::info!("resume received, starting flow loop");
                    observed.lock().unwrap().start();
                }
                EngineEvent::Tick { .. } => {}
            }
            Ok(())
        });

        Self {
            controller,
            _subscription: subscription,
        }
    }

    /// Starts the flow loop directly (initial launch).
    pub fn start(&self) {
        self.controller.lock().unwrap().start();
    }

    /// Stops the flow loop directly (shutdown).
    pub fn stop(&self) {
        self.controller.lock().unwrap().stop();
    }

    pub fn is_running(&self) -> bool {
        self.controller.lock().unwrap().is_running()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use gimbal_engine::flow::{FlowConfig, RenderSurface};

    use super::*;

    struct NullSurface {
        renders: AtomicU32,
    }

    impl RenderSurface for NullSurface {
        fn request_render(&self) {
            self.renders.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn driver() -> (LifecycleDriver, Arc<EventBus>, Arc<NullSurface>) {
        let bus = EventBus::new();
        let surface = Arc::new(NullSurface {
            renders: AtomicU32::new(0),
        });
        let controller = FlowController::new(
            FlowConfig::new(200, 5).unwrap(),
            surface.clone(),
            Arc::clone(&bus),
        );
        (LifecycleDriver::new(controller, &bus), bus, surface)
    }

    #[test]
    fn pause_and_resume_follow_the_bus() {
        let (driver, bus, _surface) = driver();

        driver.start();
        assert!(driver.is_running());

        bus.post(&EngineEvent::Pause);
        assert!(!driver.is_running());

        bus.post(&EngineEvent::Resume);
        assert!(driver.is_running());

        driver.stop();
    }

    #[test]
    fn pause_while_ticking_does_not_deadlock() {
        let (driver, bus, surface) = driver();

        driver.start();
        std::thread::sleep(Duration::from_millis(30));
        // Posted from this thread while the flow thread posts ticks.
        bus.post(&EngineEvent::Pause);

        assert!(!driver.is_running());
        assert!(surface.renders.load(Ordering::SeqCst) >= 1);
    }
}
