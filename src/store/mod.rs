use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

use arc_swap::ArcSwap;

use crate::http::MusicApi;
use crate::store::patch::StatePatch;
use crate::store::state::{AppState, Previous};

pub mod ops;
pub mod patch;
pub mod queue;
pub mod state;

pub type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

/// Handle returned by `subscribe`. Unsubscription goes through the handle,
/// never through callback identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owner of the application state. Constructed once at startup and handed to
/// each controller; `set_state` is the only mutation path.
pub struct Store {
    pub(crate) api: Arc<dyn MusicApi>,
    state: ArcSwap<AppState>,
    /// Serializes the read-merge-write of `set_state` so no two merges read
    /// the same base state.
    write: Mutex<()>,
    /// Snapshot as of the last delivered notification; `notify` re-checks
    /// against it before fanning out.
    last_notified: Mutex<Arc<AppState>>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl Store {
    pub fn new(api: Arc<dyn MusicApi>) -> Self {
        let initial = Arc::new(AppState::default());
        Self {
            api,
            state: ArcSwap::new(initial.clone()),
            write: Mutex::new(()),
            last_notified: Mutex::new(initial),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Current state snapshot. Lock-free.
    pub fn get_state(&self) -> Arc<AppState> {
        self.state.load_full()
    }

    /// Registers `listener`, invoked synchronously with the full state on
    /// every effective change, in registration order.
    pub fn subscribe(&self, listener: impl Fn(&AppState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().unwrap().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().unwrap().retain(|(held, _)| *held != id);
    }

    /// Merges `patch` into the state, but only if at least one patched field
    /// differs by value from the current state. An accepted merge snapshots
    /// the prior view/detail pair into `previous`, installs the new state,
    /// and notifies.
    pub fn set_state(&self, patch: StatePatch) {
        self.update(|_| Some(patch));
    }

    /// Computes a patch against the state read under the writer lock and
    /// merges it in the same critical section. Queue mutations go through
    /// here so two of them can never interleave between reading the list and
    /// installing the result.
    pub(crate) fn update(&self, f: impl FnOnce(&AppState) -> Option<StatePatch>) {
        {
            let _write = self.write.lock().unwrap();
            let old = self.state.load_full();
            let Some(patch) = f(&old) else {
                return;
            };
            if !patch.changes(&old) {
                return;
            }
            let mut next = (*old).clone();
            patch.apply(&mut next);
            next.previous = Previous {
                view: old.view,
                id: old.detail_id.clone(),
            };
            self.state.store(Arc::new(next));
        }
        // Listeners run outside the writer lock: a listener may legally call
        // back into set_state, producing a nested, coalesced notify.
        self.notify();
    }

    /// Re-checks for change against the last-notified snapshot and, if
    /// changed, records the snapshot then invokes all listeners. Safe to call
    /// without a set_state precursor.
    pub fn notify(&self) {
        let current = self.state.load_full();
        {
            let mut last = self.last_notified.lock().unwrap();
            if *last == current {
                return;
            }
            *last = current.clone();
        }
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&current);
        }
    }
}
