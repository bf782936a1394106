use std::path::PathBuf;

/// Storage-layer failure in the catalog database.
///
/// Fatal to the operation that triggered it: batch inserts roll back
/// fully, queries surface the error to the caller. Never retried
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-file image decode failure.
///
/// Surfaced from texture preview creation; the failing file gets no
/// cached handle, so a later selection retries the decode.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Audio device or decoder failure.
///
/// Recorded on the owning preview handle rather than thrown, so one bad
/// file cannot prevent browsing others. Clone because a failed handle
/// keeps the error as its descriptive result code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeviceError {
    #[error("Failed to open audio source: {0}")]
    Open(String),

    #[error("Failed to start audio device: {0}")]
    Start(String),

    #[error("Failed to stop audio device: {0}")]
    Stop(String),

    #[error("Failed to seek audio decoder: {0}")]
    Seek(String),

    #[error("Invalid playback transition: cannot {op} while {state}")]
    InvalidTransition {
        op: &'static str,
        state: &'static str,
    },

    #[error("Preview handle already disposed")]
    Disposed,
}

/// Configuration file failure (missing files are not errors; they fall
/// back to defaults).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
