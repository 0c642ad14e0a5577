//! Arithmetic grid: every cell is `row_header <op> col_header`.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GridError, ParseError};

/// Arithmetic operation applied across the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "−", alias = "-")]
    Subtract,
    #[serde(rename = "×", alias = "*")]
    Multiply,
    #[serde(rename = "÷", alias = "/")]
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Display symbol, also the stored form in session records.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "−",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    /// Header value ranges `(rows, cols)`.
    ///
    /// Subtraction rows start above the largest column so results stay
    /// non-negative; division columns start at 2.
    pub fn header_ranges(self) -> (RangeInclusive<i64>, RangeInclusive<i64>) {
        match self {
            Operation::Add => (1..=9, 1..=9),
            Operation::Subtract => (10..=18, 1..=9),
            Operation::Multiply => (2..=9, 2..=9),
            Operation::Divide => (20..=81, 2..=9),
        }
    }

    /// Expected value of `a <op> b`. Division floors.
    ///
    /// `None` on overflow or a zero divisor.
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Operation::Add => a.checked_add(b),
            Operation::Subtract => a.checked_sub(b),
            Operation::Multiply => a.checked_mul(b),
            Operation::Divide => a.checked_div_euclid(b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "add" => Ok(Operation::Add),
            "-" | "−" | "sub" | "subtract" => Ok(Operation::Subtract),
            "*" | "x" | "×" | "mul" | "multiply" => Ok(Operation::Multiply),
            "/" | "÷" | "div" | "divide" => Ok(Operation::Divide),
            _ => Err(ParseError::Operation(s.to_string())),
        }
    }
}

/// Row and column headers for one grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPuzzle {
    pub row_headers: Vec<i64>,
    pub col_headers: Vec<i64>,
    pub operation: Operation,
}

/// User answers, `None` for an unanswered cell.
pub type Answers = Vec<Vec<Option<i64>>>;

impl GridPuzzle {
    /// Draw a `rows` x `cols` puzzle for `operation`.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        operation: Operation,
        rng: &mut R,
    ) -> Self {
        let (row_headers, col_headers) = generate_headers(rows, cols, operation, rng);
        Self {
            row_headers,
            col_headers,
            operation,
        }
    }

    pub fn rows(&self) -> usize {
        self.row_headers.len()
    }

    pub fn cols(&self) -> usize {
        self.col_headers.len()
    }

    pub fn correct_answer(&self, row: usize, col: usize) -> Option<i64> {
        compute_answer(self.row_headers[row], self.col_headers[col], self.operation)
    }

    /// The fully and correctly answered grid.
    pub fn solution(&self) -> Answers {
        (0..self.rows())
            .map(|r| (0..self.cols()).map(|c| self.correct_answer(r, c)).collect())
            .collect()
    }

    /// Reject an attempt whose headers could not have been generated for
    /// its operation, or whose answers do not cover the grid exactly.
    pub fn check(&self, answers: &Answers) -> Result<(), GridError> {
        let (row_range, col_range) = self.operation.header_ranges();
        let axes = [
            ("row", &self.row_headers, row_range),
            ("column", &self.col_headers, col_range),
        ];
        for (axis, headers, range) in axes {
            if let Some(&value) = headers.iter().find(|h| !range.contains(*h)) {
                return Err(GridError::HeaderOutOfRange {
                    axis,
                    value,
                    min: *range.start(),
                    max: *range.end(),
                    operation: self.operation,
                });
            }
        }

        let shape_ok = answers.len() == self.rows()
            && answers.iter().all(|row| row.len() == self.cols());
        if !shape_ok {
            return Err(GridError::Shape {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }

    pub fn validate(&self, answers: &Answers) -> Vec<Vec<bool>> {
        validate_answers(
            &self.row_headers,
            &self.col_headers,
            answers,
            self.operation,
        )
    }

    /// Descriptor stored in session records, e.g. `4×4`.
    pub fn size_label(&self) -> String {
        format!("{}×{}", self.rows(), self.cols())
    }
}

/// Draw distinct headers for each axis from the operation's ranges.
///
/// If a count exceeds its range size the axis is capped at the range size.
pub fn generate_headers<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    operation: Operation,
    rng: &mut R,
) -> (Vec<i64>, Vec<i64>) {
    let (row_range, col_range) = operation.header_ranges();
    let row_headers = distinct_from(row_range, rows, rng);
    let col_headers = distinct_from(col_range, cols, rng);
    debug!(%operation, ?row_headers, ?col_headers, "generated grid headers");
    (row_headers, col_headers)
}

fn distinct_from<R: Rng + ?Sized>(range: RangeInclusive<i64>, count: usize, rng: &mut R) -> Vec<i64> {
    let mut pool: Vec<i64> = range.collect();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

pub fn compute_answer(a: i64, b: i64, operation: Operation) -> Option<i64> {
    operation.apply(a, b)
}

pub fn empty_answers(rows: usize, cols: usize) -> Answers {
    vec![vec![None; cols]; rows]
}

/// Per-cell correctness. An unanswered cell is never correct, nor is one
/// whose expected value does not fit in an `i64`.
pub fn validate_answers(
    row_headers: &[i64],
    col_headers: &[i64],
    answers: &Answers,
    operation: Operation,
) -> Vec<Vec<bool>> {
    answers
        .iter()
        .zip(row_headers)
        .map(|(row, &a)| {
            row.iter()
                .zip(col_headers)
                .map(|(cell, &b)| {
                    cell.is_some() && *cell == compute_answer(a, b, operation)
                })
                .collect()
        })
        .collect()
}

pub fn count_correct(validation: &[Vec<bool>]) -> usize {
    validation.iter().flatten().filter(|ok| **ok).count()
}

/// True once every cell has a value; submission is only offered then.
pub fn all_filled(answers: &Answers) -> bool {
    answers.iter().flatten().all(Option::is_some)
}
