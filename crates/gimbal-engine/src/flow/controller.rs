use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::events::{EngineEvent, EventBus};

use super::{Clock, SystemClock};

/// Interface for triggering a render.
///
/// `request_render` hands the request to the host surface asynchronously;
/// the flow loop never waits for the frame to finish.
pub trait RenderSurface: Send + Sync {
    fn request_render(&self);
}

/// Rejected flow-loop parameters.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum FlowConfigError {
    #[error("ticks_per_second must be > 0, got {0}")]
    InvalidTickRate(u32),

    #[error("max_catch_up_ticks must be > 0, got {0}")]
    InvalidCatchUpBound(u32),
}

/// Validated flow-loop parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    ticks_per_second: u32,
    max_catch_up_ticks: u32,
}

impl FlowConfig {
    /// Both parameters must be strictly positive.
    pub fn new(ticks_per_second: u32, max_catch_up_ticks: u32) -> Result<Self, FlowConfigError> {
        if ticks_per_second == 0 {
            return Err(FlowConfigError::InvalidTickRate(ticks_per_second));
        }
        if max_catch_up_ticks == 0 {
            return Err(FlowConfigError::InvalidCatchUpBound(max_catch_up_ticks));
        }
        Ok(Self {
            ticks_per_second,
            max_catch_up_ticks,
        })
    }

    #[inline]
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    #[inline]
    pub fn max_catch_up_ticks(&self) -> u32 {
        self.max_catch_up_ticks
    }

    #[inline]
    fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.ticks_per_second))
    }
}

/// Controls the update-render flow.
///
/// `Stopped -> Running -> Stopped`; restartable, so the host's pause/resume
/// lifecycle maps onto `stop`/`start`. Stopping is cooperative: the flag is
/// observed at the top of the next cycle, so one more render-plus-catch-up
/// cycle may complete before the worker exits.
pub struct FlowController {
    config: FlowConfig,
    surface: Arc<dyn RenderSurface>,
    bus: Arc<EventBus>,
    clock: Arc<dyn Clock>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl FlowController {
    pub fn new(config: FlowConfig, surface: Arc<dyn RenderSurface>, bus: Arc<EventBus>) -> Self {
        Self::with_clock(config, surface, bus, Arc::new(SystemClock))
    }

    /// Constructor with an explicit time source.
    pub fn with_clock(
        config: FlowConfig,
        surface: Arc<dyn RenderSurface>,
        bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            surface,
            bus,
            clock,
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Spawns the loop thread. A no-op while already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        // A previous worker may still be parked in its final sleep.
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        self.running.store(true, Ordering::Release);
        log::info!(
            "starting flow loop: {} ticks/s, catch-up cap {}",
            self.config.ticks_per_second,
            self.config.max_catch_up_ticks
        );

        let config = self.config;
        let surface = Arc::clone(&self.surface);
        let bus = Arc::clone(&self.bus);
        let clock = Arc::clone(&self.clock);
        let running = Arc::clone(&self.running);

        self.worker = Some(
            std::thread::Builder::new()
                .name("gimbal-flow".into())
                .spawn(move || run_loop(config, surface, bus, clock, running))
                .expect("spawning the flow loop thread"),
        );
    }

    /// Flips the running flag and joins the worker.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for FlowController {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(
    config: FlowConfig,
    surface: Arc<dyn RenderSurface>,
    bus: Arc<EventBus>,
    clock: Arc<dyn Clock>,
    running: Arc<AtomicBool>,
) {
    while running.load(Ordering::Acquire) {
        let cycle_start = clock.now();

        log::trace!("requesting render");
        surface.request_render();

        // Each cycle re-baselines at `cycle_start`, so any backlog beyond the
        // catch-up cap is dropped rather than queued.
        if let Some(remaining) = run_catch_up(&config, &*clock, &bus, cycle_start) {
            clock.sleep(remaining);
        }
    }
    log::info!("flow loop stopped");
}

/// Emits ticks until the loop has caught up with real time or the per-cycle
/// cap is reached. Returns the time left before the next scheduled render,
/// if any remains.
fn run_catch_up(
    config: &FlowConfig,
    clock: &dyn Clock,
    bus: &EventBus,
    cycle_start: Instant,
) -> Option<Duration> {
    let tick_period = config.tick_period();
    let mut ticks = 0u32;

    loop {
        bus.post(&EngineEvent::Tick {
            ticks_per_second: config.ticks_per_second,
        });
        ticks += 1;

        let deadline = cycle_start + tick_period * ticks;
        let now = clock.now();

        if deadline >= now {
            // Caught up.
            return Some(deadline - now);
        }
        if ticks >= config.max_catch_up_ticks {
            // Give up catching up this cycle; the slack is dropped.
            log::debug!("catch-up cap hit after {ticks} ticks");
            return None;
        }
    }
}
