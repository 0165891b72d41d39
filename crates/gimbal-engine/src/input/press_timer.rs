use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::mvp::Mvp;
use crate::scene::LongPressable;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TimerState {
    Armed,
    Cancelled,
    Fired,
}

struct TimerShared {
    state: Mutex<TimerState>,
    signal: Condvar,
}

/// One-shot long-press timer, one instance per active touch.
///
/// The worker parks on a condvar until the deadline or a cancellation
/// notify, whichever comes first; it is never busy-spun. The
/// armed/cancelled/fired transition happens under one lock, so cancellation
/// and firing can never both win.
///
/// On firing, the worker dispatches the scene's long press with a fresh
/// transform stack and exits.
pub struct PressTimer {
    shared: Arc<TimerShared>,
    worker: Option<JoinHandle<()>>,
}

impl PressTimer {
    /// Arms the timer for `press_location` (gesture space).
    pub fn arm<S>(scene: Arc<Mutex<S>>, press_location: Vec2, delay: Duration) -> Self
    where
        S: LongPressable + Send + 'static,
    {
        let shared = Arc::new(TimerShared {
            state: Mutex::new(TimerState::Armed),
            signal: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("gimbal-press-timer".into())
            .spawn(move || run_timer(worker_shared, scene, press_location, delay))
            .expect("spawning the press timer thread");

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Cancels the timer and waits for the worker to settle.
    ///
    /// Returns `true` if the long press had already fired — the caller must
    /// then consume the gesture instead of dispatching anything further.
    pub fn cancel(&mut self) -> bool {
        let fired = {
            let mut state = self.shared.state.lock().unwrap();
            match *state {
                TimerState::Fired => true,
                TimerState::Cancelled => false,
                TimerState::Armed => {
                    *state = TimerState::Cancelled;
                    self.shared.signal.notify_all();
                    false
                }
            }
        };

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        fired
    }
}

impl Drop for PressTimer {
    fn drop(&mut self) {
        let _ = self.cancel();
    }
}

fn run_timer<S>(
    shared: Arc<TimerShared>,
    scene: Arc<Mutex<S>>,
    press_location: Vec2,
    delay: Duration,
) where
    S: LongPressable + Send + 'static,
{
    let deadline = Instant::now() + delay;
    let mut state = shared.state.lock().unwrap();

    loop {
        if *state == TimerState::Cancelled {
            return;
        }

        let now = Instant::now();
        if now >= deadline {
            *state = TimerState::Fired;
            drop(state);

            log::debug!("long press fired at {press_location:?}");
            let handled = scene
                .lock()
                .unwrap()
                .handle_long_press(&mut Mvp::new(), press_location);
            if !handled {
                log::debug!("long press not handled by the scene");
            }
            return;
        }

        // Spurious wakes just re-check the state and the deadline.
        let (guard, _timed_out) = shared
            .signal
            .wait_timeout(state, deadline - now)
            .unwrap();
        state = guard;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        presses: Vec<Vec2>,
    }

    impl LongPressable for Probe {
        fn handle_long_press(&mut self, _mvp: &mut Mvp, press: Vec2) -> bool {
            self.presses.push(press);
            true
        }
    }

    #[test]
    fn fires_once_after_the_delay() {
        let scene = Arc::new(Mutex::new(Probe::default()));
        let mut timer = PressTimer::arm(
            Arc::clone(&scene),
            Vec2::new(0.1, -0.2),
            Duration::from_millis(20),
        );

        std::thread::sleep(Duration::from_millis(120));

        assert!(timer.cancel(), "cancel after the deadline reports fired");
        let probe = scene.lock().unwrap();
        assert_eq!(probe.presses, vec![Vec2::new(0.1, -0.2)]);
    }

    #[test]
    fn cancel_before_the_delay_prevents_firing() {
        let scene = Arc::new(Mutex::new(Probe::default()));
        let mut timer = PressTimer::arm(
            Arc::clone(&scene),
            Vec2::ZERO,
            Duration::from_millis(500),
        );

        assert!(!timer.cancel());

        // Give a buggy worker time to misfire before asserting.
        std::thread::sleep(Duration::from_millis(50));
        assert!(scene.lock().unwrap().presses.is_empty());
    }

    #[test]
    fn cancel_is_idempotent() {
        let scene = Arc::new(Mutex::new(Probe::default()));
        let mut timer =
            PressTimer::arm(Arc::clone(&scene), Vec2::ZERO, Duration::from_millis(500));

        assert!(!timer.cancel());
        assert!(!timer.cancel());
    }
}
