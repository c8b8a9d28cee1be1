use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::store::{Store, SubscriptionId};

/// Rotating highlight across the dashboard grid. Holds only its own cursor;
/// a grid change observed through its subscription resets the rotation.
pub struct CarouselController {
    store: Arc<Store>,
    index: Arc<AtomicUsize>,
    len: Arc<AtomicUsize>,
    subscription: SubscriptionId,
}

impl CarouselController {
    pub fn new(store: Arc<Store>) -> Self {
        let grid = store.get_state().displayed_grid.clone();
        let index = Arc::new(AtomicUsize::new(0));
        let len = Arc::new(AtomicUsize::new(grid.len()));

        let index_writer = index.clone();
        let len_writer = len.clone();
        let last_grid = Mutex::new(grid);
        let subscription = store.subscribe(move |state| {
            let mut last = last_grid.lock().unwrap();
            if *last != state.displayed_grid {
                *last = state.displayed_grid.clone();
                index_writer.store(0, Ordering::Relaxed);
                len_writer.store(state.displayed_grid.len(), Ordering::Relaxed);
            }
        });

        Self {
            store,
            index,
            len,
            subscription,
        }
    }

    /// Timer-driven advance, wrapping around the grid.
    pub fn tick(&self) {
        let len = self.len.load(Ordering::Relaxed);
        if len == 0 {
            return;
        }
        let next = (self.index.load(Ordering::Relaxed) + 1) % len;
        self.index.store(next, Ordering::Relaxed);
    }

    pub fn index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
