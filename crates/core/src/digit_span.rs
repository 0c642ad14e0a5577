//! Digit span: recall a growing sequence of digits until the first miss.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;
use crate::module::ModuleKind;
use crate::session::SessionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecallDirection {
    #[default]
    Forward,
    Backward,
}

impl RecallDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            RecallDirection::Forward => "forward",
            RecallDirection::Backward => "backward",
        }
    }
}

impl fmt::Display for RecallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecallDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(RecallDirection::Forward),
            "backward" => Ok(RecallDirection::Backward),
            _ => Err(ParseError::RecallDirection(s.to_string())),
        }
    }
}

pub fn generate_digits<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Vec<u8> {
    (0..length).map(|_| rng.gen_range(0..10)).collect()
}

/// Keep only the digits of a typed response.
pub fn parse_response(input: &str) -> Vec<u8> {
    input
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect()
}

/// Exact match against the sequence, reversed for backward recall.
pub fn check_recall(sequence: &[u8], response: &[u8], direction: RecallDirection) -> bool {
    match direction {
        RecallDirection::Forward => sequence == response,
        RecallDirection::Backward => {
            sequence.len() == response.len() && sequence.iter().rev().eq(response.iter())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallTrial {
    pub sequence: Vec<u8>,
    pub response: Vec<u8>,
    pub correct: bool,
}

/// One digit-span run. Each correct recall lengthens the next sequence by
/// one digit; the first miss ends the run.
#[derive(Debug, Clone)]
pub struct DigitSpanSession {
    direction: RecallDirection,
    current_length: usize,
    sequence: Vec<u8>,
    trials: Vec<RecallTrial>,
    max_span: usize,
    finished: bool,
}

impl DigitSpanSession {
    pub fn start<R: Rng + ?Sized>(
        starting_length: usize,
        direction: RecallDirection,
        rng: &mut R,
    ) -> Self {
        let starting_length = starting_length.max(1);
        Self {
            direction,
            current_length: starting_length,
            sequence: generate_digits(starting_length, rng),
            trials: Vec::new(),
            max_span: 0,
            finished: false,
        }
    }

    /// Digits to memorise for the current trial.
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn current_length(&self) -> usize {
        self.current_length
    }

    pub fn direction(&self) -> RecallDirection {
        self.direction
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn max_span(&self) -> usize {
        self.max_span
    }

    pub fn trials(&self) -> &[RecallTrial] {
        &self.trials
    }

    /// Judge a response to the current sequence. Returns whether it was
    /// correct. After a correct answer a longer sequence is ready; after a
    /// miss the session is finished and further calls return false.
    pub fn submit<R: Rng + ?Sized>(&mut self, response: &[u8], rng: &mut R) -> bool {
        if self.finished {
            return false;
        }
        let correct = check_recall(&self.sequence, response, self.direction);
        self.trials.push(RecallTrial {
            sequence: std::mem::take(&mut self.sequence),
            response: response.to_vec(),
            correct,
        });

        if correct {
            self.max_span = self.max_span.max(self.current_length);
            self.current_length += 1;
            self.sequence = generate_digits(self.current_length, rng);
        } else {
            self.max_span = self.max_span.max(self.current_length - 1);
            self.finished = true;
        }
        debug!(
            length = self.current_length,
            correct,
            max_span = self.max_span,
            "digit span trial"
        );
        correct
    }

    pub fn into_result(self, timestamp: u64, time_ms: Option<u64>) -> SessionResult {
        let correct = self.trials.iter().filter(|t| t.correct).count() as u32;
        SessionResult::new(
            timestamp,
            ModuleKind::DigitSpan,
            format!("{} span", self.max_span),
            self.trials.len() as u32,
            correct,
        )
        .with_time_ms(time_ms)
        .with_direction(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn backward_recall_reverses() {
        assert!(check_recall(&[1, 2, 3], &[3, 2, 1], RecallDirection::Backward));
        assert!(!check_recall(&[1, 2, 3], &[1, 2, 3], RecallDirection::Backward));
        assert!(check_recall(&[1, 2, 3], &[1, 2, 3], RecallDirection::Forward));
        assert!(!check_recall(&[1, 2, 3], &[1, 2], RecallDirection::Forward));
        assert!(!check_recall(&[1, 2, 3], &[2, 1], RecallDirection::Backward));
    }

    #[test]
    fn response_keeps_digits_only() {
        assert_eq!(parse_response("4 7-1x9"), vec![4, 7, 1, 9]);
        assert!(parse_response("abc").is_empty());
    }

    #[test]
    fn session_grows_then_ends_on_miss() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = DigitSpanSession::start(4, RecallDirection::Forward, &mut rng);
        assert_eq!(session.sequence().len(), 4);

        let answer = session.sequence().to_vec();
        assert!(session.submit(&answer, &mut rng));
        assert_eq!(session.sequence().len(), 5);

        let answer = session.sequence().to_vec();
        assert!(session.submit(&answer, &mut rng));
        assert_eq!(session.max_span(), 5);

        assert!(!session.submit(&[], &mut rng));
        assert!(session.is_finished());
        assert_eq!(session.max_span(), 5);
        assert!(!session.submit(&[1], &mut rng));
        assert_eq!(session.trials().len(), 3);

        let rec = session.into_result(100, Some(9000));
        assert_eq!(rec.grid_size, "5 span");
        assert_eq!(rec.total_cells, 3);
        assert_eq!(rec.correct_count, 2);
        assert_eq!(rec.accuracy, 67);
        assert_eq!(rec.direction, Some(RecallDirection::Forward));
    }

    #[test]
    fn first_miss_reports_one_below_start() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = DigitSpanSession::start(5, RecallDirection::Backward, &mut rng);
        session.submit(&[], &mut rng);
        assert_eq!(session.max_span(), 4);
    }
}
