//! Thread-safe handle over one `GardenSession`.
//!
//! One mutex guards the whole session, so "timer fires, read sketch head,
//! plant, insert" runs as a single critical section.

use crate::model::placed::PlacedObject;
use crate::model::sketch::Sketch;
use crate::service::garden_service::{GardenError, GardenSession, GardenSnapshot, TickOutcome};
use crate::timer::TimerDisplay;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, lock-guarded session handle for multi-threaded hosts.
#[derive(Clone)]
pub struct SharedGarden {
    inner: Arc<Mutex<GardenSession>>,
}

impl SharedGarden {
    pub fn new(session: GardenSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn on_save(&self, sketch: Sketch) {
        self.lock().on_save(sketch);
    }

    pub fn tick(&self, now_ms: u64) -> TickOutcome {
        self.lock().tick(now_ms)
    }

    pub fn plant_most_recent(&self) -> Result<PlacedObject, GardenError> {
        self.lock().plant_most_recent()
    }

    pub fn pause(&self, now_ms: u64) {
        self.lock().pause(now_ms);
    }

    pub fn resume(&self, now_ms: u64) {
        self.lock().resume(now_ms);
    }

    pub fn timer_display(&self, now_ms: u64) -> TimerDisplay {
        self.lock().timer_display(now_ms)
    }

    pub fn snapshot(&self, now_ms: u64) -> GardenSnapshot {
        self.lock().snapshot(now_ms)
    }

    /// Runs `f` with exclusive access to the session.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut GardenSession) -> R) -> R {
        f(&mut self.lock())
    }

    // Poison is ignored: no session method leaves state half-written.
    fn lock(&self) -> MutexGuard<'_, GardenSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
