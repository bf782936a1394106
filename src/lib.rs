pub mod config;
pub mod error;
pub mod preview;
pub mod query;
pub mod scan;
pub mod state;

// Re-exports to mirror main.rs so tests and downstream code can access
// items like `asset_browser::Library` directly.
pub use config::BrowserConfig;
pub use error::{ConfigError, DecodeError, DeviceError, StorageError};
pub use preview::{PreviewCache, PreviewHandle};
pub use state::data::{CandidateFile, FileKind, FileRecord, MatchMode};
pub use state::library::Library;
