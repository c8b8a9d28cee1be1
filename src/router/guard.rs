use std::sync::{Arc, Mutex};

/// Which direction of the URL↔state sync is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncSource {
    #[default]
    None,
    FromUrl,
    FromState,
}

/// Re-entrancy token for the bidirectional sync. One direction claims the
/// guard, runs its synchronous cascade, and releases on the next scheduling
/// tick; the opposite direction backs off while the token is held.
#[derive(Default)]
pub struct SyncGuard {
    source: Mutex<SyncSource>,
}

impl SyncGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SyncSource {
        *self.source.lock().unwrap()
    }

    /// Claims the guard for `source`. Fails only when the opposite direction
    /// holds it; re-claiming the same direction is allowed.
    pub fn begin(&self, source: SyncSource) -> bool {
        let mut held = self.source.lock().unwrap();
        if *held != SyncSource::None && *held != source {
            return false;
        }
        *held = source;
        true
    }

    /// Clears the token on the next scheduling tick, never before the
    /// current set_state/notify cascade has completed.
    pub fn release_deferred(self: &Arc<Self>) {
        let guard = self.clone();
        tokio::spawn(async move {
            *guard.source.lock().unwrap() = SyncSource::None;
        });
    }
}
