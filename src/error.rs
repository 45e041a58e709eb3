use std::io;

use thiserror::Error;

/// Failures of the typing-session engine itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no words between {min_length} and {max_length} characters in the word pool")]
    NoEligibleWords { min_length: usize, max_length: usize },
}

/// Failures while reading a word source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read word source: {0}")]
    Io(#[from] io::Error),

    #[error("word source contained no words")]
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
