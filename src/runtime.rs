use std::collections::VecDeque;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;

use crate::{
    clock::Clock,
    screen::Screen,
    session::{SessionController, SessionState},
    stats::FinalReport,
};

/// Key events the engine understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Escape,
    Enter,
}

impl KeyInput {
    /// Maps a terminal key event; `None` for keys the engine ignores.
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match key.code {
            // ctrl+c quits like ESC
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyInput::Escape)
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(KeyInput::Char(c))
            }
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Esc => Some(KeyInput::Escape),
            KeyCode::Enter => Some(KeyInput::Enter),
            _ => None,
        }
    }
}

/// Blocking source of key input
pub trait KeySource {
    /// Waits for the next key. `Ok(None)` means the source is exhausted.
    fn next_key(&mut self) -> io::Result<Option<KeyInput>>;
}

/// Production key source reading the terminal through crossterm
#[derive(Debug, Default)]
pub struct CrosstermKeySource;

impl KeySource for CrosstermKeySource {
    fn next_key(&mut self) -> io::Result<Option<KeyInput>> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = KeyInput::from_key_event(key) {
                    return Ok(Some(input));
                }
            }
        }
    }
}

/// Replays a fixed list of keys, for tests and headless runs
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeySource {
    keys: VecDeque<KeyInput>,
}

impl ScriptedKeySource {
    pub fn new<I: IntoIterator<Item = KeyInput>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// One key per character: `\n` is Enter, `\u{8}` Backspace, `\u{1b}` Escape.
    pub fn from_script(script: &str) -> Self {
        Self::new(script.chars().map(|c| match c {
            '\n' => KeyInput::Enter,
            '\u{8}' | '\u{7f}' => KeyInput::Backspace,
            '\u{1b}' => KeyInput::Escape,
            other => KeyInput::Char(other),
        }))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeySource {
    fn next_key(&mut self) -> io::Result<Option<KeyInput>> {
        Ok(self.keys.pop_front())
    }
}

/// How a program run ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Quit,
    Finished(FinalReport),
}

/// Pumps keys into a controller until the run quits or a session finishes
pub struct Runner<K: KeySource> {
    keys: K,
}

impl<K: KeySource> Runner<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    pub fn run<R, C, S>(
        &mut self,
        controller: &mut SessionController<R, C>,
        screen: &mut S,
    ) -> io::Result<SessionOutcome>
    where
        R: Rng,
        C: Clock,
        S: Screen,
    {
        controller.redraw(screen);
        screen.present()?;

        loop {
            let Some(key) = self.keys.next_key()? else {
                tracing::info!("key source closed");
                return Ok(SessionOutcome::Quit);
            };

            let state = controller.handle_key(key, screen);
            screen.present()?;

            match state {
                SessionState::Quit => return Ok(SessionOutcome::Quit),
                SessionState::Finished => {
                    if let Some(report) = controller.report() {
                        return Ok(SessionOutcome::Finished(report.clone()));
                    }
                }
                _ => {}
            }
        }
    }

    pub fn into_inner(self) -> K {
        self.keys
    }
}
