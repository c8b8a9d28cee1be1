use std::time::Duration;

use async_trait::async_trait;

use crate::audio::error::AudioError;

/// The audio-producing resource. Exactly one implementation instance is
/// owned by the playback loop, which is its only driver.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Loads a new source, replacing whatever was loaded before. Returns the
    /// source duration when the backend knows it.
    async fn load(&self, url: &str) -> Result<Duration, AudioError>;
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    fn seek(&self, position: Duration);
    fn position(&self) -> Duration;
    /// True once the loaded source has played to its end.
    fn finished(&self) -> bool;
}

/// Headless output: accepts every command and never finishes. Used in tests
/// and when running without an audio device.
#[derive(Debug, Default)]
pub struct NullOutput;

#[async_trait]
impl AudioOutput for NullOutput {
    async fn load(&self, _url: &str) -> Result<Duration, AudioError> {
        Ok(Duration::ZERO)
    }

    fn play(&self) {}

    fn pause(&self) {}

    fn stop(&self) {}

    fn seek(&self, _position: Duration) {}

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn finished(&self) -> bool {
        false
    }
}
