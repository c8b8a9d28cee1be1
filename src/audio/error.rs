use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Device(String),

    #[error("source stream failed: {0}")]
    Stream(String),

    #[error("could not decode source: {0}")]
    Decode(String),

    #[error("network failure while buffering: {0}")]
    Network(String),
}
