use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::tty::IsTty;
use std::{
    error::Error,
    fs::{self, File, OpenOptions},
    io::{self, stdin, BufReader},
    path::PathBuf,
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;
use typetest::{
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{CrosstermKeySource, Runner, SessionOutcome},
    ui::TerminalScreen,
    word_pool::{BlankWordPolicy, PoolLimits, WordPool},
    Difficulty, LoadError, SessionController,
};

/// timed typing test with live feedback and final statistics
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed typing test: pick a difficulty, type the passage, and get wpm, keystrokes, mistakes, cps and accuracy. Words come from --words, piped stdin, or the bundled list."
)]
pub struct Cli {
    /// file with one candidate word per line
    #[clap(short = 'w', long)]
    words: Option<PathBuf>,

    /// skip the menu and open a passage of this difficulty
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// number of seconds to run test
    #[clap(short = 's', long)]
    secs: Option<u64>,

    /// drop blank lines from the word source instead of keeping them as empty words
    #[clap(long)]
    skip_blank_words: bool,

    /// config file to use instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Stored config with command line overrides applied
    fn resolve_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let mut config = store.load();
        if let Some(secs) = self.secs {
            config.time_limit_secs = secs;
        }
        if self.skip_blank_words {
            config.blank_words = BlankWordPolicy::Skip;
        }
        config
    }

    fn load_pool(&self, limits: &PoolLimits) -> Result<WordPool, LoadError> {
        if let Some(path) = &self.words {
            let file = File::open(path)?;
            return WordPool::from_reader(BufReader::new(file), limits);
        }

        if !stdin().is_tty() {
            match WordPool::from_reader(stdin().lock(), limits) {
                Err(LoadError::Empty) => {
                    tracing::warn!("stdin had no words, using bundled list");
                }
                other => return other,
            }
        }
        Ok(WordPool::bundled(limits))
    }
}

fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env("TYPETEST_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = cli.resolve_config();
    config.validate()?;
    let pool = cli.load_pool(&config.pool_limits())?;
    tracing::info!(words = pool.len(), "word pool loaded");

    if !io::stdout().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdout must be a tty").exit();
    }

    let mut controller = SessionController::new(
        pool,
        config.session_settings(),
        rand::thread_rng(),
        SystemClock,
    );

    let mut screen = TerminalScreen::enter()?;
    if let Some(difficulty) = cli.difficulty {
        controller.choose(difficulty, &mut screen);
    }
    let outcome = Runner::new(CrosstermKeySource).run(&mut controller, &mut screen);
    screen.leave()?;

    if let SessionOutcome::Finished(report) = outcome? {
        println!("{report}");
    }

    Ok(())
}
