/// App-wide events carried on the flume bus and drained by the orchestrator.
#[derive(Debug, Clone)]
pub enum Event {
    // Signals
    /// The hash bar changed, by user navigation or canonicalization.
    HashChanged,
    TrackEnded,
    PlaybackProgress(u64),
    PlaybackFailed(String),

    // Commands
    Toast(String),
    Quit,
}
