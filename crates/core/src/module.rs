//! Module registry and per-module puzzle dispatch.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::digit_span::{generate_digits, RecallDirection};
use crate::error::SettingsError;
use crate::grid::{GridPuzzle, Operation};
use crate::maze::{generate_directions, DirectionSet};
use crate::sequence::{Difficulty, Sequence, SequenceGenerator};
use crate::spelling::{generate_trials, Trial};
use crate::stroop::{self, StroopMode, StroopTrial};

/// A registered mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    ArithmeticGrid,
    DigitSpan,
    Stroop,
    NumberSequences,
    SpellCheck,
    MentalMap,
}

impl ModuleKind {
    /// Registry order, as listed on the home view.
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::ArithmeticGrid,
        ModuleKind::DigitSpan,
        ModuleKind::Stroop,
        ModuleKind::NumberSequences,
        ModuleKind::SpellCheck,
        ModuleKind::MentalMap,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ModuleKind::ArithmeticGrid => "arithmetic-grid",
            ModuleKind::DigitSpan => "digit-span",
            ModuleKind::Stroop => "stroop",
            ModuleKind::NumberSequences => "number-sequences",
            ModuleKind::SpellCheck => "spell-check",
            ModuleKind::MentalMap => "mental-map",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModuleKind::ArithmeticGrid => "Arithmetic Grid",
            ModuleKind::DigitSpan => "Digit Span",
            ModuleKind::Stroop => "Stroop Test",
            ModuleKind::NumberSequences => "Number Sequences",
            ModuleKind::SpellCheck => "Spell Check",
            ModuleKind::MentalMap => "Mental Map",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ModuleKind::ArithmeticGrid => {
                "Practice mental math with addition, subtraction, multiplication, and division."
            }
            ModuleKind::DigitSpan => "Remember and recall number sequences",
            ModuleKind::Stroop => "Name the ink color, not the word",
            ModuleKind::NumberSequences => "Find the pattern, predict the next number",
            ModuleKind::SpellCheck => "Spot the misspelled words",
            ModuleKind::MentalMap => "Follow directions from memory",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ModuleKind::ArithmeticGrid => "🧮",
            ModuleKind::DigitSpan => "🔢",
            ModuleKind::Stroop => "🎨",
            ModuleKind::NumberSequences => "📐",
            ModuleKind::SpellCheck => "✏️",
            ModuleKind::MentalMap => "🗺️",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    /// Uniformly random module, for the home view's "Random" button.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Settings for one session of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "module", rename_all = "kebab-case")]
pub enum Settings {
    ArithmeticGrid {
        rows: usize,
        cols: usize,
        operation: Operation,
    },
    DigitSpan {
        starting_length: usize,
        direction: RecallDirection,
    },
    Stroop {
        trial_count: usize,
        mode: StroopMode,
    },
    NumberSequences {
        sequence_count: usize,
        difficulty: Difficulty,
    },
    SpellCheck {
        word_count: usize,
    },
    MentalMap {
        grid_size: i32,
        step_count: usize,
        rounds: usize,
    },
}

impl Settings {
    /// The setup screen's initial selection for `module`.
    pub fn defaults(module: ModuleKind) -> Self {
        match module {
            ModuleKind::ArithmeticGrid => Settings::ArithmeticGrid {
                rows: 4,
                cols: 4,
                operation: Operation::Add,
            },
            ModuleKind::DigitSpan => Settings::DigitSpan {
                starting_length: 4,
                direction: RecallDirection::Forward,
            },
            ModuleKind::Stroop => Settings::Stroop {
                trial_count: 20,
                mode: StroopMode::Incongruent,
            },
            ModuleKind::NumberSequences => Settings::NumberSequences {
                sequence_count: 10,
                difficulty: Difficulty::Medium,
            },
            ModuleKind::SpellCheck => Settings::SpellCheck { word_count: 20 },
            ModuleKind::MentalMap => Settings::MentalMap {
                grid_size: 5,
                step_count: 5,
                rounds: 3,
            },
        }
    }

    pub fn module(&self) -> ModuleKind {
        match self {
            Settings::ArithmeticGrid { .. } => ModuleKind::ArithmeticGrid,
            Settings::DigitSpan { .. } => ModuleKind::DigitSpan,
            Settings::Stroop { .. } => ModuleKind::Stroop,
            Settings::NumberSequences { .. } => ModuleKind::NumberSequences,
            Settings::SpellCheck { .. } => ModuleKind::SpellCheck,
            Settings::MentalMap { .. } => ModuleKind::MentalMap,
        }
    }

    /// Descriptor stored as the session's `gridSize`.
    pub fn size_label(&self) -> String {
        match *self {
            Settings::ArithmeticGrid { rows, cols, .. } => format!("{}×{}", rows, cols),
            Settings::DigitSpan {
                starting_length, ..
            } => format!("{} start", starting_length),
            Settings::Stroop { trial_count, .. } => format!("{} trials", trial_count),
            Settings::NumberSequences { sequence_count, .. } => {
                format!("{} sequences", sequence_count)
            }
            Settings::SpellCheck { word_count } => format!("{} words", word_count),
            Settings::MentalMap { grid_size, .. } => format!("{}×{}", grid_size, grid_size),
        }
    }

    /// Check every count against what the module can sensibly generate.
    ///
    /// [`Settings::generate`] trusts its input, so settings that arrive as
    /// JSON or flags go through here first.
    pub fn validate(&self) -> Result<(), SettingsError> {
        match *self {
            Settings::ArithmeticGrid { rows, cols, .. } => {
                within("rows", rows, 1, 9)?;
                within("cols", cols, 1, 9)
            }
            Settings::DigitSpan {
                starting_length, ..
            } => within("starting_length", starting_length, 1, 20),
            Settings::Stroop { trial_count, .. } => within("trial_count", trial_count, 1, 200),
            Settings::NumberSequences { sequence_count, .. } => {
                within("sequence_count", sequence_count, 1, 200)
            }
            Settings::SpellCheck { word_count } => within("word_count", word_count, 1, 200),
            Settings::MentalMap {
                grid_size,
                step_count,
                rounds,
            } => {
                within("grid_size", grid_size, 2, 20)?;
                within("step_count", step_count, 1, 50)?;
                within("rounds", rounds, 1, 20)
            }
        }
    }

    /// Generate everything one session needs up front.
    ///
    /// Digit span only draws its first sequence; later ones depend on the
    /// player's answers (see [`crate::DigitSpanSession`]).
    pub fn generate<R: Rng + ?Sized>(
        &self,
        sequences: &mut SequenceGenerator,
        rng: &mut R,
    ) -> Puzzle {
        match *self {
            Settings::ArithmeticGrid {
                rows,
                cols,
                operation,
            } => Puzzle::ArithmeticGrid(GridPuzzle::generate(rows, cols, operation, rng)),
            Settings::DigitSpan {
                starting_length, ..
            } => Puzzle::DigitSpan(generate_digits(starting_length, rng)),
            Settings::Stroop { trial_count, mode } => {
                Puzzle::Stroop(stroop::generate_trials(trial_count, mode, rng))
            }
            Settings::NumberSequences {
                sequence_count,
                difficulty,
            } => Puzzle::NumberSequences(
                (0..sequence_count)
                    .map(|_| sequences.generate(difficulty, rng))
                    .collect(),
            ),
            Settings::SpellCheck { word_count } => {
                Puzzle::SpellCheck(generate_trials(word_count, rng))
            }
            Settings::MentalMap {
                grid_size,
                step_count,
                rounds,
            } => Puzzle::MentalMap(
                (0..rounds)
                    .map(|_| generate_directions(grid_size, step_count, rng))
                    .collect(),
            ),
        }
    }
}

fn within<T>(field: &'static str, value: T, min: i64, max: i64) -> Result<(), SettingsError>
where
    T: TryInto<i64>,
{
    let value: i64 = value.try_into().unwrap_or(i64::MAX);
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError {
            field,
            value,
            min,
            max,
        })
    }
}

/// Generated content for one session, tagged by module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "module", content = "puzzle", rename_all = "kebab-case")]
pub enum Puzzle {
    ArithmeticGrid(GridPuzzle),
    DigitSpan(Vec<u8>),
    Stroop(Vec<StroopTrial>),
    NumberSequences(Vec<Sequence>),
    SpellCheck(Vec<Trial>),
    MentalMap(Vec<DirectionSet>),
}

impl Puzzle {
    pub fn module(&self) -> ModuleKind {
        match self {
            Puzzle::ArithmeticGrid(_) => ModuleKind::ArithmeticGrid,
            Puzzle::DigitSpan(_) => ModuleKind::DigitSpan,
            Puzzle::Stroop(_) => ModuleKind::Stroop,
            Puzzle::NumberSequences(_) => ModuleKind::NumberSequences,
            Puzzle::SpellCheck(_) => ModuleKind::SpellCheck,
            Puzzle::MentalMap(_) => ModuleKind::MentalMap,
        }
    }
}
