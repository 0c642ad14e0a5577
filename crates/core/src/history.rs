//! Bounded session history that keeps every played module visible.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::session::SessionResult;

/// Maximum number of sessions kept.
pub const DEFAULT_HISTORY_CAP: usize = 10;

/// The persisted document: `{ "sessions": [...] }`, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub sessions: Vec<SessionResult>,
}

impl Stats {
    /// Decode a stored document. Anything of the wrong shape is an empty
    /// history.
    pub fn from_json(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(error = %e, "discarding malformed session history");
            Stats::default()
        })
    }

    /// Append a finished session and prune to `cap`.
    pub fn record(&mut self, result: SessionResult, cap: usize) {
        self.sessions.push(result);
        self.sessions = prune(std::mem::take(&mut self.sessions), cap);
    }

    /// Most recent first, at most `limit`.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &SessionResult> {
        self.sessions.iter().rev().take(limit)
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}

/// Reduce `sessions` to at most `cap` entries, oldest first.
///
/// Each module's most recent session is kept first; remaining slots go to
/// the most recent of the rest. If more modules were played than `cap`
/// allows, the modules played longest ago lose their entry.
pub fn prune(sessions: Vec<SessionResult>, cap: usize) -> Vec<SessionResult> {
    if sessions.len() <= cap {
        let mut sessions = sessions;
        sessions.sort_by_key(|s| s.timestamp);
        return sessions;
    }

    // Indices newest first; stable for equal timestamps.
    let mut by_recency: Vec<usize> = (0..sessions.len()).collect();
    by_recency.sort_by(|&a, &b| {
        sessions[b]
            .timestamp
            .cmp(&sessions[a].timestamp)
            .then(b.cmp(&a))
    });

    let mut newest_per_module: HashMap<&str, usize> = HashMap::new();
    for &i in &by_recency {
        newest_per_module
            .entry(sessions[i].module_id.as_str())
            .or_insert(i);
    }
    let mut kept: BTreeSet<usize> = newest_per_module.into_values().collect();

    for &i in &by_recency {
        if kept.len() >= cap {
            break;
        }
        kept.insert(i);
    }

    let mut ordered: Vec<usize> = kept.into_iter().collect();
    ordered.sort_by(|&a, &b| {
        sessions[a]
            .timestamp
            .cmp(&sessions[b].timestamp)
            .then(a.cmp(&b))
    });
    let skip = ordered.len().saturating_sub(cap);
    let keep: BTreeSet<usize> = ordered[skip..].iter().copied().collect();

    let mut result: Vec<SessionResult> = sessions
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.contains(i))
        .map(|(_, s)| s)
        .collect();
    result.sort_by_key(|s| s.timestamp);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleKind;

    fn session(ts: u64, module: ModuleKind) -> SessionResult {
        SessionResult::new(ts, module, "t", 10, 5)
    }

    #[test]
    fn under_cap_is_sorted_only() {
        let out = prune(
            vec![
                session(3, ModuleKind::Stroop),
                session(1, ModuleKind::Stroop),
            ],
            10,
        );
        let ts: Vec<u64> = out.iter().map(|s| s.timestamp).collect();
        assert_eq!(ts, vec![1, 3]);
    }

    #[test]
    fn keeps_old_module_entry() {
        let mut sessions = vec![session(1, ModuleKind::MentalMap)];
        for ts in 2..=20 {
            sessions.push(session(ts, ModuleKind::ArithmeticGrid));
        }
        let out = prune(sessions, 5);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].module_id, "mental-map");
        let ts: Vec<u64> = out.iter().map(|s| s.timestamp).collect();
        assert_eq!(ts, vec![1, 17, 18, 19, 20]);
    }

    #[test]
    fn more_modules_than_cap_drops_oldest_modules() {
        let sessions: Vec<SessionResult> = ModuleKind::ALL
            .into_iter()
            .enumerate()
            .map(|(i, m)| session(i as u64, m))
            .collect();
        let out = prune(sessions, 4);
        let ts: Vec<u64> = out.iter().map(|s| s.timestamp).collect();
        assert_eq!(ts, vec![2, 3, 4, 5]);
    }

    #[test]
    fn malformed_document_is_empty() {
        assert_eq!(Stats::from_json(serde_json::json!([1, 2])), Stats::default());
        assert_eq!(
            Stats::from_json(serde_json::json!({"sessions": "nope"})),
            Stats::default()
        );
        assert_eq!(Stats::from_json(serde_json::json!({})), Stats::default());
    }

    #[test]
    fn record_appends_and_prunes() {
        let mut stats = Stats::default();
        for ts in 0..12 {
            stats.record(session(ts, ModuleKind::Stroop), 10);
        }
        assert_eq!(stats.sessions.len(), 10);
        assert_eq!(stats.recent(1).next().map(|s| s.timestamp), Some(11));
        stats.clear();
        assert!(stats.sessions.is_empty());
    }
}
