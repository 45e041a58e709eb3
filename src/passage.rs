use itertools::Itertools;
use rand::Rng;

use crate::{difficulty::DifficultyProfile, error::EngineError, word_pool::WordPool};

/// Upper bound on passage length regardless of what a profile asks for
pub const MAX_PASSAGE_WORDS: usize = 60;

/// The reference text for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    words: Vec<String>,
    text: String,
    chars: Vec<char>,
}

impl Passage {
    pub fn from_words(words: Vec<String>) -> Self {
        let text = words.iter().join(" ");
        let chars = text.chars().collect();
        Self { words, text, chars }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Words joined by single spaces, no trailing space
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters the user has to type
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }
}

/// Samples passages from a word pool.
#[derive(Debug, Clone, Copy)]
pub struct PassageGenerator {
    max_words: usize,
}

impl Default for PassageGenerator {
    fn default() -> Self {
        Self::new(MAX_PASSAGE_WORDS)
    }
}

impl PassageGenerator {
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }

    /// Draws `profile.word_count` words (capped) uniformly, with replacement,
    /// from the pool words whose length fits the profile.
    pub fn generate<R: Rng>(
        &self,
        pool: &WordPool,
        profile: &DifficultyProfile,
        rng: &mut R,
    ) -> Result<Passage, EngineError> {
        let eligible: Vec<&String> = pool.words().iter().filter(|w| profile.admits(w)).collect();
        if eligible.is_empty() {
            return Err(EngineError::NoEligibleWords {
                min_length: profile.min_length,
                max_length: profile.max_length,
            });
        }

        let count = profile.word_count.min(self.max_words);
        let words = (0..count)
            .map(|_| eligible[rng.gen_range(0..eligible.len())].clone())
            .collect();

        tracing::debug!(
            eligible = eligible.len(),
            words = count,
            "generated passage"
        );
        Ok(Passage::from_words(words))
    }
}
