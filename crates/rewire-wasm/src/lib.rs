//! Browser bindings for rewire-core.
//!
//! Every export takes and returns JSON strings. Failures come back as
//! `{"error": "..."}` rather than exceptions. Stateful play (sequence
//! repeat guards, digit span runs, map navigation) lives behind integer
//! handles; see [`sessions`].

use rand::thread_rng;
use rewire_core::grid::{all_filled, count_correct, Answers};
use rewire_core::module::Settings;
use rewire_core::{
    accuracy_percent, maze, spelling, stroop, GridPuzzle, ModuleKind, Operation, Route, Scorecard,
    SequenceGenerator, SessionResult, Stats, StroopMode, View,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

mod sessions;

pub use sessions::*;

pub(crate) fn error_json(msg: &str) -> String {
    serde_json::json!({ "error": msg }).to_string()
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&format!("serialization: {}", e)))
}

#[wasm_bindgen]
pub fn list_modules() -> String {
    let modules: Vec<serde_json::Value> = ModuleKind::ALL
        .iter()
        .map(|m| {
            serde_json::json!({
                "id": m.id(),
                "name": m.name(),
                "description": m.description(),
                "icon": m.icon(),
            })
        })
        .collect();
    to_json(&modules)
}

/// Resolve a location against the module registry.
///
/// Returns the route plus `found: false` for an unregistered module id so
/// the page can render its not-found view.
#[wasm_bindgen]
pub fn parse_route(location: &str, base_path: &str) -> String {
    let route = Route::parse(location, base_path);
    let mut value = match serde_json::to_value(&route) {
        Ok(v) => v,
        Err(e) => return error_json(&format!("serialization: {}", e)),
    };
    match route.resolve() {
        Ok(View::Home) => value["found"] = true.into(),
        Ok(View::Module(m)) => {
            value["found"] = true.into();
            value["name"] = m.name().into();
        }
        Err(e) => {
            value["found"] = false.into();
            value["message"] = e.to_string().into();
        }
    }
    value.to_string()
}

/// Settings JSON is the tagged form, e.g.
/// `{"module":"stroop","trial_count":20,"mode":"mixed"}`.
#[wasm_bindgen]
pub fn default_settings(module_id: &str) -> String {
    match ModuleKind::from_id(module_id) {
        Some(m) => to_json(&Settings::defaults(m)),
        None => error_json(&format!("module not found: {}", module_id)),
    }
}

#[wasm_bindgen]
pub fn generate_session(settings_json: &str) -> String {
    let settings: Settings = match serde_json::from_str(settings_json) {
        Ok(s) => s,
        Err(e) => return error_json(&format!("invalid settings JSON: {}", e)),
    };
    if let Err(e) = settings.validate() {
        return error_json(&e.to_string());
    }
    let puzzle = settings.generate(&mut SequenceGenerator::new(), &mut thread_rng());
    serde_json::json!({
        "sizeLabel": settings.size_label(),
        "session": puzzle,
    })
    .to_string()
}

#[wasm_bindgen]
pub fn generate_grid(rows: u32, cols: u32, operation: &str) -> String {
    let operation: Operation = match operation.parse() {
        Ok(op) => op,
        Err(e) => return error_json(&format!("{}", e)),
    };
    to_json(&GridPuzzle::generate(
        rows as usize,
        cols as usize,
        operation,
        &mut thread_rng(),
    ))
}

#[derive(Deserialize)]
struct GridAttempt {
    #[serde(flatten)]
    puzzle: GridPuzzle,
    answers: Answers,
}

/// Score a grid: `{rowHeaders, colHeaders, operation, answers}` where an
/// unanswered cell is `null`. Headers outside the operation's ranges or a
/// ragged `answers` array are errors.
#[wasm_bindgen]
pub fn validate_grid(attempt_json: &str) -> String {
    let attempt: GridAttempt = match serde_json::from_str(attempt_json) {
        Ok(a) => a,
        Err(e) => return error_json(&format!("invalid grid JSON: {}", e)),
    };
    if let Err(e) = attempt.puzzle.check(&attempt.answers) {
        return error_json(&e.to_string());
    }
    let validation = attempt.puzzle.validate(&attempt.answers);
    let correct = count_correct(&validation);
    let total = attempt.puzzle.rows() * attempt.puzzle.cols();
    let accuracy = accuracy_percent(
        u32::try_from(correct).unwrap_or(u32::MAX),
        u32::try_from(total).unwrap_or(u32::MAX),
    );
    serde_json::json!({
        "validation": validation,
        "correctCount": correct,
        "totalCells": total,
        "accuracy": accuracy,
        "complete": all_filled(&attempt.answers),
    })
    .to_string()
}

#[wasm_bindgen]
pub fn generate_directions(grid_size: i32, step_count: u32) -> String {
    let step_count = step_count as usize;
    let settings = Settings::MentalMap {
        grid_size,
        step_count,
        rounds: 1,
    };
    if let Err(e) = settings.validate() {
        return error_json(&e.to_string());
    }
    let walk = maze::generate_directions(grid_size, step_count, &mut thread_rng());
    let mut value = match serde_json::to_value(&walk) {
        Ok(v) => v,
        Err(e) => return error_json(&format!("serialization: {}", e)),
    };
    value["text"] = walk.to_text().into();
    value.to_string()
}

#[wasm_bindgen]
pub fn generate_spelling_trials(count: u32) -> String {
    to_json(&spelling::generate_trials(count as usize, &mut thread_rng()))
}

#[wasm_bindgen]
pub fn generate_stroop_trials(count: u32, mode: &str) -> String {
    let mode: StroopMode = match mode.parse() {
        Ok(m) => m,
        Err(e) => return error_json(&format!("{}", e)),
    };
    let settings = Settings::Stroop {
        trial_count: count as usize,
        mode,
    };
    if let Err(e) = settings.validate() {
        return error_json(&e.to_string());
    }
    to_json(&stroop::generate_trials(count as usize, mode, &mut thread_rng()))
}

#[derive(Deserialize)]
struct Judgement {
    correct: bool,
    #[serde(default)]
    ms: u64,
}

/// Summarise a trial-based session (Stroop, spell check, sequences).
///
/// `judgements_json` is `[{"correct": true, "ms": 850}, ...]`.
#[wasm_bindgen]
pub fn score_judgements(
    module_id: &str,
    size_label: &str,
    judgements_json: &str,
    timestamp_ms: f64,
    time_ms: Option<f64>,
) -> String {
    let Some(module) = ModuleKind::from_id(module_id) else {
        return error_json(&format!("module not found: {}", module_id));
    };
    let judgements: Vec<Judgement> = match serde_json::from_str(judgements_json) {
        Ok(j) => j,
        Err(e) => return error_json(&format!("invalid judgements JSON: {}", e)),
    };

    let mut card = Scorecard::new();
    for j in &judgements {
        card.record(j.correct, j.ms);
    }
    let average = card.average_response_ms();
    let result = card.into_result(
        timestamp_ms.max(0.0) as u64,
        module,
        size_label,
        time_ms.map(|t| t.max(0.0) as u64),
    );
    serde_json::json!({
        "result": result,
        "averageResponseMs": average,
    })
    .to_string()
}

/// Append `result_json` to the stored history document and prune to `cap`.
///
/// A malformed or empty `stats_json` is treated as an empty history, so the
/// caller can pass whatever local storage holds.
#[wasm_bindgen]
pub fn record_session(stats_json: &str, result_json: &str, cap: u32) -> String {
    let result: SessionResult = match serde_json::from_str(result_json) {
        Ok(r) => r,
        Err(e) => return error_json(&format!("invalid session JSON: {}", e)),
    };
    let value = serde_json::from_str(stats_json).unwrap_or(serde_json::Value::Null);
    let mut stats = Stats::from_json(value);
    stats.record(result, cap as usize);
    to_json(&stats)
}

#[wasm_bindgen]
pub fn format_elapsed(ms: f64) -> String {
    rewire_core::format_elapsed(ms.max(0.0) as u64)
}
