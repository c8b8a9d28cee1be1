use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Real-time playback position, held outside the store so position ticks
/// never notify store subscribers. Readers hold the generation to detect a
/// transition under them.
#[derive(Default, Debug)]
pub struct TrackProgress {
    current_position_millis: AtomicU64,
    total_duration_millis: AtomicU64,
    generation: AtomicU64,
}

impl TrackProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_position(&self, position: Duration) {
        self.current_position_millis
            .store(position.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_total_duration(&self, duration: Duration) {
        self.total_duration_millis
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn get_progress(&self) -> (u64, u64) {
        (
            self.current_position_millis.load(Ordering::Relaxed),
            self.total_duration_millis.load(Ordering::Relaxed),
        )
    }

    pub fn get_generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.set_current_position(Duration::ZERO);
        self.set_total_duration(Duration::ZERO);
    }
}
