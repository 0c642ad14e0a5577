//! Spell check: decide whether a displayed word is spelled correctly.

mod words;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A canonical spelling and one common misspelling of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WordPair {
    pub correct: &'static str,
    pub misspelled: &'static str,
}

/// The built-in pair table.
pub fn word_pairs() -> impl ExactSizeIterator<Item = WordPair> {
    words::WORD_PAIRS
        .iter()
        .map(|&(correct, misspelled)| WordPair {
            correct,
            misspelled,
        })
}

/// One judgement: is `word` spelled correctly?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    pub word: String,
    pub is_correct: bool,
    /// Correct spelling, shown as feedback after a wrong judgement.
    pub source_word: String,
}

impl Trial {
    fn from_pair(pair: WordPair, show_correct: bool) -> Self {
        Self {
            word: if show_correct {
                pair.correct
            } else {
                pair.misspelled
            }
            .to_string(),
            is_correct: show_correct,
            source_word: pair.correct.to_string(),
        }
    }

    /// Whether the user's judgement matches the truth.
    pub fn judge(&self, user_said_correct: bool) -> bool {
        user_said_correct == self.is_correct
    }
}

/// Draw up to `count` trials from the built-in table.
pub fn generate_trials<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Trial> {
    let pairs: Vec<WordPair> = word_pairs().collect();
    generate_trials_from(&pairs, count, rng)
}

/// Draw up to `count` trials from `pairs`, each pair used at most once.
///
/// Each trial shows the correct or misspelled form with equal probability.
pub fn generate_trials_from<R: Rng + ?Sized>(
    pairs: &[WordPair],
    count: usize,
    rng: &mut R,
) -> Vec<Trial> {
    let mut deck = pairs.to_vec();
    deck.shuffle(rng);
    deck.truncate(count);
    let trials: Vec<Trial> = deck
        .into_iter()
        .map(|pair| Trial::from_pair(pair, rng.gen_bool(0.5)))
        .collect();
    debug!(requested = count, drawn = trials.len(), "generated spelling trials");
    trials
}
