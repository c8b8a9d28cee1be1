use std::time::Duration;

use crate::model::Track;

/// Commands consumed by the playback loop. One consumer means one transition
/// at a time, in order.
#[derive(Debug, Clone)]
pub enum PlayerCommand {
    /// Track edge: stop whatever plays, load the new source, start.
    Transition(Track),
    Play,
    Pause,
    Stop,
    Seek(Duration),
}
