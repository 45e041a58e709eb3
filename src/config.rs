use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    error::ConfigError,
    passage::MAX_PASSAGE_WORDS,
    session::SessionSettings,
    word_pool::{BlankWordPolicy, PoolLimits},
};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub time_limit_secs: u64,
    pub max_passage_words: usize,
    pub max_pool_words: usize,
    pub max_word_len: usize,
    pub blank_words: BlankWordPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let limits = PoolLimits::default();
        Self {
            time_limit_secs: 60,
            max_passage_words: MAX_PASSAGE_WORDS,
            max_pool_words: limits.max_words,
            max_word_len: limits.max_word_len,
            blank_words: limits.blank_words,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("time_limit_secs", self.time_limit_secs as usize),
            ("max_passage_words", self.max_passage_words),
            ("max_pool_words", self.max_pool_words),
            ("max_word_len", self.max_word_len),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            time_limit: Duration::from_secs(self.time_limit_secs),
            max_passage_words: self.max_passage_words,
        }
    }

    pub fn pool_limits(&self) -> PoolLimits {
        PoolLimits {
            max_words: self.max_pool_words,
            max_word_len: self.max_word_len,
            blank_words: self.blank_words,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typetest") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typetest_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }
}
