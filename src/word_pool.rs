use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

use crate::error::LoadError;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

const BUNDLED_LIST: &str = "english.txt";

/// What to do with lines that are empty once the terminator is stripped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankWordPolicy {
    /// Accept them as zero-length words. They can never satisfy a profile.
    #[default]
    Keep,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    pub max_words: usize,
    pub max_word_len: usize,
    pub blank_words: BlankWordPolicy,
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self {
            max_words: 1000,
            max_word_len: 19,
            blank_words: BlankWordPolicy::Keep,
        }
    }
}

/// Candidate words for passage generation, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Builds a pool from raw lines, one word per line, stopping at `limits.max_words`.
    pub fn load<I, S>(lines: I, limits: &PoolLimits) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = lines
            .into_iter()
            .filter_map(|line| normalize(line.as_ref(), limits))
            .take(limits.max_words)
            .collect();
        Self { words }
    }

    /// Reads lines from `reader` until it is exhausted or the pool is full.
    pub fn from_reader<R: BufRead>(reader: R, limits: &PoolLimits) -> Result<Self, LoadError> {
        let mut words = Vec::new();
        let mut saw_line = false;
        for line in reader.split(b'\n') {
            if words.len() >= limits.max_words {
                break;
            }
            let line = line?;
            saw_line = true;
            // undecodable bytes become U+FFFD instead of failing the load
            let line = String::from_utf8_lossy(&line);
            if let Some(word) = normalize(&line, limits) {
                words.push(word);
            }
        }

        if !saw_line {
            return Err(LoadError::Empty);
        }
        tracing::debug!(count = words.len(), "loaded word pool");
        Ok(Self { words })
    }

    /// The word list compiled into the binary.
    pub fn bundled(limits: &PoolLimits) -> Self {
        let contents = WORDS_DIR
            .get_file(BUNDLED_LIST)
            .and_then(|f| f.contents_utf8())
            .unwrap_or_default();
        Self::load(contents.lines(), limits)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize(line: &str, limits: &PoolLimits) -> Option<String> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.is_empty() && limits.blank_words == BlankWordPolicy::Skip {
        return None;
    }
    Some(line.chars().take(limits.max_word_len).collect())
}
