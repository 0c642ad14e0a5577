//! Persistence for reWire session history.
//!
//! History lives under a string key as a `{ "sessions": [...] }` JSON
//! document, the same shape the browser keeps in local storage.

pub mod conformance;
mod error;
mod file;
mod memory;
mod traits;

pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::HistoryStore;

/// Key the browser front-end stores history under.
pub const DEFAULT_STATS_KEY: &str = "rewire-stats";
