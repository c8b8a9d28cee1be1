use std::sync::Mutex;

use flume::Sender;

use crate::event::events::Event;

/// The hash bar seam. Stands in for the browser location: holds the current
/// hash and emits `Event::HashChanged` on the bus when it changes, which the
/// orchestrator routes back to the URL sync controller.
pub struct Location {
    hash: Mutex<String>,
    event_tx: Sender<Event>,
}

impl Location {
    pub fn new(event_tx: Sender<Event>) -> Self {
        Self {
            hash: Mutex::new(String::new()),
            event_tx,
        }
    }

    pub fn with_hash(event_tx: Sender<Event>, hash: &str) -> Self {
        Self {
            hash: Mutex::new(hash.to_string()),
            event_tx,
        }
    }

    pub fn get_hash(&self) -> String {
        self.hash.lock().unwrap().clone()
    }

    /// Writes the hash. Same-value writes do not fire a change event, so a
    /// canonicalizing rewrite never produces a duplicate history entry.
    pub fn set_hash(&self, hash: &str) {
        {
            let mut held = self.hash.lock().unwrap();
            if *held == hash {
                return;
            }
            *held = hash.to_string();
        }
        let _ = self.event_tx.send(Event::HashChanged);
    }
}
