//! Handle-based state for multi-step play.

use std::cell::RefCell;

use rand::thread_rng;
use rewire_core::digit_span::parse_response;
use rewire_core::{
    Difficulty, DigitSpanSession, DirectionSet, Navigator, RecallDirection, RelativeDirection,
    SequenceGenerator,
};
use slab::Slab;
use wasm_bindgen::prelude::*;

use crate::{error_json, to_json};

struct StoredNavigator {
    navigator: Navigator,
    walk: DirectionSet,
}

thread_local! {
    static SEQUENCES: RefCell<Slab<SequenceGenerator>> = const { RefCell::new(Slab::new()) };
    static DIGIT_SPANS: RefCell<Slab<DigitSpanSession>> = const { RefCell::new(Slab::new()) };
    static NAVIGATORS: RefCell<Slab<StoredNavigator>> = const { RefCell::new(Slab::new()) };
}

fn free<T: 'static>(slab: &'static std::thread::LocalKey<RefCell<Slab<T>>>, handle: u32) {
    slab.with(|entries| {
        let mut entries = entries.borrow_mut();
        if entries.contains(handle as usize) {
            entries.remove(handle as usize);
        }
    });
}

// ── Number sequences ─────────────────────────────────────────────────────────

/// A generator whose repeat guards persist across calls.
#[wasm_bindgen]
pub fn new_sequence_session() -> u32 {
    SEQUENCES.with(|s| s.borrow_mut().insert(SequenceGenerator::new()) as u32)
}

#[wasm_bindgen]
pub fn free_sequence_session(handle: u32) {
    free(&SEQUENCES, handle);
}

#[wasm_bindgen]
pub fn next_sequence(handle: u32, difficulty: &str) -> String {
    let difficulty: Difficulty = match difficulty.parse() {
        Ok(d) => d,
        Err(e) => return error_json(&format!("{}", e)),
    };
    SEQUENCES.with(|s| match s.borrow_mut().get_mut(handle as usize) {
        Some(generator) => to_json(&generator.generate(difficulty, &mut thread_rng())),
        None => error_json(&format!("invalid sequence handle: {}", handle)),
    })
}

// ── Digit span ───────────────────────────────────────────────────────────────

fn digit_span_state(handle: u32, session: &DigitSpanSession) -> serde_json::Value {
    serde_json::json!({
        "handle": handle,
        "sequence": session.sequence(),
        "length": session.current_length(),
        "maxSpan": session.max_span(),
        "finished": session.is_finished(),
    })
}

#[wasm_bindgen]
pub fn start_digit_span(starting_length: u32, direction: &str) -> String {
    let direction: RecallDirection = match direction.parse() {
        Ok(d) => d,
        Err(e) => return error_json(&format!("{}", e)),
    };
    let session = DigitSpanSession::start(starting_length as usize, direction, &mut thread_rng());
    DIGIT_SPANS.with(|s| {
        let mut sessions = s.borrow_mut();
        let entry = sessions.vacant_entry();
        let handle = entry.key() as u32;
        let state = digit_span_state(handle, &session);
        entry.insert(session);
        state.to_string()
    })
}

/// Judge a typed response; non-digit characters are ignored.
#[wasm_bindgen]
pub fn submit_digit_span(handle: u32, response: &str) -> String {
    let digits = parse_response(response);
    DIGIT_SPANS.with(|s| match s.borrow_mut().get_mut(handle as usize) {
        Some(session) => {
            if session.is_finished() {
                return error_json("digit span session already finished");
            }
            let correct = session.submit(&digits, &mut thread_rng());
            let mut state = digit_span_state(handle, session);
            state["correct"] = correct.into();
            state.to_string()
        }
        None => error_json(&format!("invalid digit span handle: {}", handle)),
    })
}

/// Consume a session and return its history record.
#[wasm_bindgen]
pub fn finish_digit_span(handle: u32, timestamp_ms: f64, time_ms: Option<f64>) -> String {
    let session = DIGIT_SPANS.with(|s| {
        let mut sessions = s.borrow_mut();
        sessions
            .contains(handle as usize)
            .then(|| sessions.remove(handle as usize))
    });
    match session {
        Some(session) => to_json(&session.into_result(
            timestamp_ms.max(0.0) as u64,
            time_ms.map(|t| t.max(0.0) as u64),
        )),
        None => error_json(&format!("invalid digit span handle: {}", handle)),
    }
}

// ── Mental map ───────────────────────────────────────────────────────────────

fn navigator_state(stored: &StoredNavigator) -> serde_json::Value {
    serde_json::json!({
        "position": stored.navigator.position(),
        "moves": stored.navigator.moves_made(),
        "reached": stored.navigator.reached(&stored.walk),
    })
}

/// Place a cursor at the start of `walk_json` (a generated walk).
#[wasm_bindgen]
pub fn new_navigator(walk_json: &str, grid_size: i32) -> String {
    let walk: DirectionSet = match serde_json::from_str(walk_json) {
        Ok(w) => w,
        Err(e) => return error_json(&format!("invalid walk JSON: {}", e)),
    };
    let navigator = Navigator::for_walk(&walk, grid_size);
    let handle = NAVIGATORS.with(|n| n.borrow_mut().insert(StoredNavigator { navigator, walk }));
    serde_json::json!({ "handle": handle }).to_string()
}

#[wasm_bindgen]
pub fn free_navigator(handle: u32) {
    free(&NAVIGATORS, handle);
}

/// Move by a key: arrow key names or WASD.
#[wasm_bindgen]
pub fn navigator_step(handle: u32, key: &str) -> String {
    let Some(direction) = RelativeDirection::from_key(key) else {
        return error_json(&format!("unknown direction key: {}", key));
    };
    NAVIGATORS.with(|n| match n.borrow_mut().get_mut(handle as usize) {
        Some(stored) => {
            let moved = stored.navigator.step(direction);
            let mut state = navigator_state(stored);
            state["moved"] = moved.into();
            state.to_string()
        }
        None => error_json(&format!("invalid navigator handle: {}", handle)),
    })
}

#[wasm_bindgen]
pub fn navigator_undo(handle: u32) -> String {
    NAVIGATORS.with(|n| match n.borrow_mut().get_mut(handle as usize) {
        Some(stored) => {
            stored.navigator.undo();
            navigator_state(stored).to_string()
        }
        None => error_json(&format!("invalid navigator handle: {}", handle)),
    })
}
