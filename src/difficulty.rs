use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How many words a passage holds and which word lengths qualify for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub word_count: usize,
    pub min_length: usize,
    pub max_length: usize,
}

impl DifficultyProfile {
    pub const fn new(word_count: usize, min_length: usize, max_length: usize) -> Self {
        Self {
            word_count,
            min_length,
            max_length,
        }
    }

    /// Whether `word` (measured in characters) fits the length bounds
    pub fn admits(&self, word: &str) -> bool {
        let len = word.chars().count();
        self.min_length <= len && len <= self.max_length
    }
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::new(20, 1, 4),
            Difficulty::Medium => DifficultyProfile::new(40, 5, 7),
            Difficulty::Hard => DifficultyProfile::new(60, 8, 19),
        }
    }

    /// Menu digit for this difficulty ('1' through '3')
    pub fn digit(&self) -> char {
        match self {
            Difficulty::Easy => '1',
            Difficulty::Medium => '2',
            Difficulty::Hard => '3',
        }
    }

    pub fn from_digit(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.digit() == c)
    }
}
