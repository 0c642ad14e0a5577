use super::{check, make_session, TestResult, KEY};
use crate::HistoryStore;
use rewire_core::ModuleKind;

pub(super) fn run_record_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: HistoryStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "record",
            "record_appends_and_persists",
            record_appends_and_persists(factory),
        ),
        TestResult::from_result(
            "record",
            "record_prunes_to_cap",
            record_prunes_to_cap(factory),
        ),
        TestResult::from_result(
            "record",
            "record_keeps_every_module",
            record_keeps_every_module(factory),
        ),
        TestResult::from_result(
            "record",
            "record_over_malformed_starts_fresh",
            record_over_malformed_starts_fresh(factory),
        ),
        TestResult::from_result("record", "clear_empties_history", clear_empties_history(factory)),
    ]
}

fn record_appends_and_persists<S: HistoryStore, F: Fn() -> S>(
    factory: &F,
) -> Result<(), String> {
    let store = factory();
    store
        .record_session(KEY, make_session(10, ModuleKind::DigitSpan), 10)
        .map_err(|e| e.to_string())?;
    let returned = store
        .record_session(KEY, make_session(20, ModuleKind::Stroop), 10)
        .map_err(|e| e.to_string())?;
    let loaded = store.load(KEY).map_err(|e| e.to_string())?;
    check(loaded == returned, || {
        "returned history differs from persisted history".to_string()
    })?;
    let ts: Vec<u64> = loaded.sessions.iter().map(|s| s.timestamp).collect();
    check(ts == vec![10, 20], || format!("timestamps {:?}", ts))
}

fn record_prunes_to_cap<S: HistoryStore, F: Fn() -> S>(factory: &F) -> Result<(), String> {
    let store = factory();
    for ts in 0..25 {
        store
            .record_session(KEY, make_session(ts, ModuleKind::ArithmeticGrid), 10)
            .map_err(|e| e.to_string())?;
    }
    let loaded = store.load(KEY).map_err(|e| e.to_string())?;
    check(loaded.sessions.len() == 10, || {
        format!("expected 10 sessions, got {}", loaded.sessions.len())
    })?;
    let first = loaded.sessions.first().map(|s| s.timestamp);
    check(first == Some(15), || format!("oldest kept is {:?}", first))
}

fn record_keeps_every_module<S: HistoryStore, F: Fn() -> S>(factory: &F) -> Result<(), String> {
    let store = factory();
    store
        .record_session(KEY, make_session(0, ModuleKind::SpellCheck), 10)
        .map_err(|e| e.to_string())?;
    for ts in 1..30 {
        store
            .record_session(KEY, make_session(ts, ModuleKind::NumberSequences), 10)
            .map_err(|e| e.to_string())?;
    }
    let loaded = store.load(KEY).map_err(|e| e.to_string())?;
    check(
        loaded
            .sessions
            .iter()
            .any(|s| s.module() == Some(ModuleKind::SpellCheck)),
        || "spell-check entry was pruned away".to_string(),
    )
}

fn record_over_malformed_starts_fresh<S: HistoryStore, F: Fn() -> S>(
    factory: &F,
) -> Result<(), String> {
    let store = factory();
    store.write_raw(KEY, "[]").map_err(|e| e.to_string())?;
    let stats = store
        .record_session(KEY, make_session(3, ModuleKind::MentalMap), 10)
        .map_err(|e| e.to_string())?;
    check(stats.sessions.len() == 1, || {
        format!("expected 1 session, got {}", stats.sessions.len())
    })
}

fn clear_empties_history<S: HistoryStore, F: Fn() -> S>(factory: &F) -> Result<(), String> {
    let store = factory();
    store
        .record_session(KEY, make_session(1, ModuleKind::Stroop), 10)
        .map_err(|e| e.to_string())?;
    store.clear(KEY).map_err(|e| e.to_string())?;
    let loaded = store.load(KEY).map_err(|e| e.to_string())?;
    check(loaded.sessions.is_empty(), || {
        "history not empty after clear".to_string()
    })
}
