use async_trait::async_trait;
use tracing::info;

use crate::model::Track;

/// Spoken track introductions. Strictly best-effort: failures are logged and
/// swallowed at the call site, and playback never waits on anything beyond
/// the announce call itself.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, track: &Track, listener_name: &str) -> color_eyre::Result<()>;
}

/// Writes the introduction to the log instead of speaking it.
#[derive(Debug, Default)]
pub struct LogAnnouncer;

#[async_trait]
impl Announcer for LogAnnouncer {
    async fn announce(&self, track: &Track, listener_name: &str) -> color_eyre::Result<()> {
        if listener_name.is_empty() {
            info!(title = %track.title, artist = %track.artist, "now playing");
        } else {
            info!(
                title = %track.title,
                artist = %track.artist,
                listener = %listener_name,
                "now playing"
            );
        }
        Ok(())
    }
}
