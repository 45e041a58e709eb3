// Library surface for headless/integration tests and reuse.
// Terminal setup and CLI parsing stay in main.rs.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod layout;
pub mod passage;
pub mod runtime;
pub mod screen;
pub mod session;
pub mod stats;
pub mod tracker;
pub mod ui;
pub mod word_pool;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::{ConfigError, EngineError, LoadError};
pub use session::{SessionController, SessionSettings, SessionState};
