//! rewire-core: puzzle generation and scoring engine for the reWire
//! cognitive-training games.
//!
//! Every generator is a plain function over an injected [`rand::Rng`], so
//! callers decide between `thread_rng()` in production and a seeded
//! `StdRng` in tests.
//!
//! # Public API
//!
//! - [`sequence`] -- number-pattern puzzles with per-difficulty repeat guards
//! - [`grid`] -- arithmetic grid headers, answers and validation
//! - [`maze`] -- mental-map direction walks and interactive navigation
//! - [`spelling`] -- correct/misspelled word judgement trials
//! - [`stroop`] -- colour-word interference trials
//! - [`digit_span`] -- digit recall sequences and span progression
//! - [`session`] -- completed-session summary records
//! - [`history`] -- bounded, diversity-preserving session history
//! - [`module`] / [`route`] -- module registry and view routing

pub mod digit_span;
pub mod error;
pub mod grid;
pub mod history;
pub mod maze;
pub mod module;
pub mod route;
pub mod sequence;
pub mod session;
pub mod spelling;
pub mod stroop;

// ── Convenience re-exports: key types ────────────────────────────────

pub use digit_span::{DigitSpanSession, RecallDirection};
pub use error::{GridError, ParseError, RouteError, SettingsError};
pub use grid::{GridPuzzle, Operation};
pub use history::{prune, Stats, DEFAULT_HISTORY_CAP};
pub use maze::{Cell, DirectionSet, Facing, Navigator, RelativeDirection};
pub use module::ModuleKind;
pub use route::{Route, View};
pub use sequence::{Difficulty, Sequence, SequenceGenerator, SequenceKind};
pub use session::{accuracy_percent, format_elapsed, Scorecard, SessionResult};
pub use spelling::{Trial, WordPair};
pub use stroop::{Color, StroopMode, StroopTrial};
