use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// The notifications the engine emits or expects to receive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One fixed-size simulation update elapsed. Carries the configured rate
    /// so consumers can compute per-tick deltas.
    Tick { ticks_per_second: u32 },

    /// Host suspended; stop the flow loop and release GPU resources.
    Pause,

    /// Host resumed; restart the flow loop and reacquire GPU resources.
    Resume,
}

type Callback = Arc<dyn Fn(&EngineEvent) -> anyhow::Result<()> + Send + Sync>;

/// Thread-safe fan-out of [`EngineEvent`]s.
///
/// Delivery is synchronous on the posting thread. A failing subscriber is
/// logged and skipped; it never aborts delivery to the others and never
/// propagates into the posting loop.
///
/// The subscriber table is snapshotted before delivery, so callbacks may
/// themselves subscribe or unsubscribe, and a subscriber that blocks (for
/// example a pause handler joining the flow thread) cannot deadlock a
/// concurrent post.
pub struct EventBus {
    subscribers: Mutex<HashMap<u64, Callback>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        })
    }

    /// Registers `callback` and returns the guard that owns the registration.
    #[must_use = "dropping the subscription immediately unregisters it"]
    pub fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(&EngineEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .lock()
            .unwrap()
            .insert(id, Arc::new(callback));

        Subscription {
            bus: Arc::downgrade(self),
            id,
        }
    }

    /// Delivers `event` to every subscriber registered at the time of the
    /// call.
    pub fn post(&self, event: &EngineEvent) {
        let snapshot: Vec<(u64, Callback)> = self
            .subscribers
            .lock()
            .unwrap()
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            if let Err(err) = callback(event) {
                log::error!("subscriber {id} failed on {event:?}: {err:#}");
            }
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers.lock().unwrap().remove(&id);
    }
}

/// Scoped registration on an [`EventBus`].
///
/// Dropping the guard removes the callback. Holding a `Weak` bus reference
/// keeps subscription lifetime from extending the bus's own.
pub struct Subscription {
    bus: Weak<EventBus>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}
