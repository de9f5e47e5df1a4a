// File: src/error.rs

/// Errors raised by a preference store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not persist store: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Errors raised while handing a payload to the peer transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Peer is not paired or the companion app is not installed")]
    Unavailable,

    #[error("Peer is not reachable")]
    Unreachable,

    #[error("Transport channel disconnected")]
    Disconnected,

    #[error("Could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}
