//! Conformance test suite for `HistoryStore` implementations.
//!
//! A backend-agnostic suite any store can run to verify correctness:
//!
//! - **Load**: missing keys and malformed documents read as empty history
//! - **Record**: append, pruning to the cap, per-module retention, clear
//!
//! # Usage
//!
//! ```ignore
//! use rewire_storage::conformance::run_conformance_suite;
//!
//! #[test]
//! fn file_store_conformance() {
//!     let dir = tempfile::tempdir().unwrap();
//!     let report = run_conformance_suite(|| JsonFileStore::new(fresh_subdir(&dir)));
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod load;
mod record;

use std::fmt;

use rewire_core::{ModuleKind, SessionResult};

use crate::HistoryStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "load", "record").
    pub category: String,
    pub name: String,
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        let (passed, message) = match result {
            Ok(()) => (true, None),
            Err(msg) => (false, Some(msg)),
        };
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed,
            message,
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in self.results.iter().filter(|r| !r.passed) {
            writeln!(
                f,
                "  FAIL [{}/{}]: {}",
                r.category,
                r.name,
                r.message.as_deref().unwrap_or("(no message)")
            )?;
        }
        Ok(())
    }
}

/// Run the full conformance suite against a store.
///
/// `factory` is called once per test and must return a fresh, empty store.
pub fn run_conformance_suite<S, F>(factory: F) -> ConformanceReport
where
    S: HistoryStore,
    F: Fn() -> S,
{
    let mut results = Vec::new();
    results.extend(load::run_load_tests(&factory));
    results.extend(record::run_record_tests(&factory));

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();
    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

const KEY: &str = "conformance-stats";

fn make_session(timestamp: u64, module: ModuleKind) -> SessionResult {
    SessionResult::new(timestamp, module, "4×4", 16, 12).with_time_ms(Some(30_000))
}

fn check(cond: bool, msg: impl FnOnce() -> String) -> Result<(), String> {
    if cond {
        Ok(())
    } else {
        Err(msg())
    }
}
