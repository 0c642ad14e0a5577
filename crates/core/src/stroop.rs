//! Stroop test: name the ink colour, not the word.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }

    /// Word shown on screen.
    pub fn label(self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Blue => "BLUE",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
        }
    }

    /// Ink value used when rendering.
    pub fn hex(self) -> &'static str {
        match self {
            Color::Red => "#dc3545",
            Color::Blue => "#0d6efd",
            Color::Green => "#198754",
            Color::Yellow => "#ffc107",
        }
    }

    /// Response key: the colour's initial.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'r' => Some(Color::Red),
            'b' => Some(Color::Blue),
            'g' => Some(Color::Green),
            'y' => Some(Color::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::Color(s.to_string()))
    }
}

/// How word and ink relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StroopMode {
    /// Ink always matches the word.
    Congruent,
    /// Ink never matches the word.
    Incongruent,
    /// Either, with equal probability.
    Mixed,
}

impl FromStr for StroopMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "congruent" | "easy" => Ok(StroopMode::Congruent),
            "incongruent" | "hard" => Ok(StroopMode::Incongruent),
            "mixed" => Ok(StroopMode::Mixed),
            _ => Err(ParseError::StroopMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StroopTrial {
    pub word: Color,
    pub ink_color: Color,
}

impl StroopTrial {
    pub fn is_congruent(&self) -> bool {
        self.word == self.ink_color
    }

    /// A response is right when it names the ink.
    pub fn is_correct(&self, response: Color) -> bool {
        response == self.ink_color
    }
}

pub fn generate_trial<R: Rng + ?Sized>(mode: StroopMode, rng: &mut R) -> StroopTrial {
    let word = Color::ALL[rng.gen_range(0..Color::ALL.len())];
    let congruent = match mode {
        StroopMode::Congruent => true,
        StroopMode::Incongruent => false,
        StroopMode::Mixed => rng.gen_bool(0.5),
    };
    let ink_color = if congruent {
        word
    } else {
        let others: Vec<Color> = Color::ALL.into_iter().filter(|c| *c != word).collect();
        others.choose(rng).copied().unwrap_or(word)
    };
    StroopTrial { word, ink_color }
}

pub fn generate_trials<R: Rng + ?Sized>(
    count: usize,
    mode: StroopMode,
    rng: &mut R,
) -> Vec<StroopTrial> {
    (0..count).map(|_| generate_trial(mode, rng)).collect()
}
