use rewire_core::{SessionResult, Stats};
use tracing::debug;

use crate::error::StorageError;

/// Key/value store for session history documents.
///
/// ## Read semantics
///
/// `load` never fails on content: a missing key and a document of the
/// wrong shape both read as empty history. Only backend failures (I/O,
/// invalid key) are errors.
///
/// ## Write semantics
///
/// `save` replaces the whole document for the key. `record_session` is a
/// read-modify-write of a single key and is not atomic across processes.
pub trait HistoryStore: Send + Sync {
    /// Raw document stored under `key`, if any.
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`.
    fn write_raw(&self, key: &str, document: &str) -> Result<(), StorageError>;

    fn load(&self, key: &str) -> Result<Stats, StorageError> {
        let Some(raw) = self.read_raw(key)? else {
            return Ok(Stats::default());
        };
        let value = serde_json::from_str(&raw).unwrap_or(serde_json::Value::Null);
        Ok(Stats::from_json(value))
    }

    fn save(&self, key: &str, stats: &Stats) -> Result<(), StorageError> {
        let document = serde_json::to_string(stats)?;
        self.write_raw(key, &document)
    }

    /// Append a finished session, prune to `cap`, persist, and return the
    /// new history.
    fn record_session(
        &self,
        key: &str,
        result: SessionResult,
        cap: usize,
    ) -> Result<Stats, StorageError> {
        let mut stats = self.load(key)?;
        stats.record(result, cap);
        self.save(key, &stats)?;
        debug!(key, sessions = stats.sessions.len(), "recorded session");
        Ok(stats)
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.save(key, &Stats::default())
    }
}
