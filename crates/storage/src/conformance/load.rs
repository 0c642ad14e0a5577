use super::{check, make_session, TestResult, KEY};
use crate::HistoryStore;
use rewire_core::{ModuleKind, Stats};

pub(super) fn run_load_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: HistoryStore,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "load",
            "missing_key_is_empty",
            missing_key_is_empty(factory),
        ),
        TestResult::from_result(
            "load",
            "invalid_json_is_empty",
            invalid_json_is_empty(factory),
        ),
        TestResult::from_result(
            "load",
            "wrong_shape_is_empty",
            wrong_shape_is_empty(factory),
        ),
        TestResult::from_result(
            "load",
            "save_then_load_returns_document",
            save_then_load_returns_document(factory),
        ),
        TestResult::from_result(
            "load",
            "legacy_entries_default_module",
            legacy_entries_default_module(factory),
        ),
        TestResult::from_result(
            "load",
            "keys_are_independent",
            keys_are_independent(factory),
        ),
    ]
}

fn missing_key_is_empty<S: HistoryStore, F: Fn() -> S>(factory: &F) -> Result<(), String> {
    let store = factory();
    let stats = store.load(KEY).map_err(|e| e.to_string())?;
    check(stats.sessions.is_empty(), || {
        format!("expected empty history, got {}", stats.sessions.len())
    })
}

fn invalid_json_is_empty<S: HistoryStore, F: Fn() -> S>(factory: &F) -> Result<(), String> {
    let store = factory();
    store
        .write_raw(KEY, "{not json")
        .map_err(|e| e.to_string())?;
    let stats = store.load(KEY).map_err(|e| e.to_string())?;
    check(stats == Stats::default(), || {
        "invalid JSON did not load as empty".to_string()
    })
}

fn wrong_shape_is_empty<S: HistoryStore, F: Fn() -> S>(factory: &F) -> Result<(), String> {
    let store = factory();
    store
        .write_raw(KEY, r#"{"sessions":[{"timestamp":"yesterday"}]}"#)
        .map_err(|e| e.to_string())?;
    let stats = store.load(KEY).map_err(|e| e.to_string())?;
    check(stats.sessions.is_empty(), || {
        "wrong-shape document did not load as empty".to_string()
    })
}

fn save_then_load_returns_document<S: HistoryStore, F: Fn() -> S>(
    factory: &F,
) -> Result<(), String> {
    let store = factory();
    let stats = Stats {
        sessions: vec![
            make_session(1, ModuleKind::Stroop),
            make_session(2, ModuleKind::MentalMap),
        ],
    };
    store.save(KEY, &stats).map_err(|e| e.to_string())?;
    let loaded = store.load(KEY).map_err(|e| e.to_string())?;
    check(loaded == stats, || {
        format!("loaded {:?}, expected {:?}", loaded, stats)
    })
}

fn legacy_entries_default_module<S: HistoryStore, F: Fn() -> S>(
    factory: &F,
) -> Result<(), String> {
    let store = factory();
    store
        .write_raw(
            KEY,
            r#"{"sessions":[{"timestamp":5,"gridSize":"3×3","totalCells":9,"correctCount":9,"accuracy":100,"timeMs":null}]}"#,
        )
        .map_err(|e| e.to_string())?;
    let stats = store.load(KEY).map_err(|e| e.to_string())?;
    let module = stats.sessions.first().and_then(|s| s.module());
    check(module == Some(ModuleKind::ArithmeticGrid), || {
        format!("legacy entry resolved to {:?}", module)
    })
}

fn keys_are_independent<S: HistoryStore, F: Fn() -> S>(factory: &F) -> Result<(), String> {
    let store = factory();
    store
        .record_session(KEY, make_session(1, ModuleKind::Stroop), 10)
        .map_err(|e| e.to_string())?;
    let other = store.load("other-stats").map_err(|e| e.to_string())?;
    check(other.sessions.is_empty(), || {
        "write to one key leaked into another".to_string()
    })
}
