use std::time::Duration;

use rand::Rng;

use crate::{
    clock::{Clock, SessionClock},
    difficulty::Difficulty,
    layout::PassageLayout,
    passage::{Passage, PassageGenerator, MAX_PASSAGE_WORDS},
    runtime::KeyInput,
    screen::{Screen, Tone},
    stats::{FinalReport, Stats},
    tracker::{InputTracker, Redraw},
    word_pool::WordPool,
};

/// Key that abandons the current passage and goes back to the menu
pub const RESTART_KEY: char = '4';

const PASSAGE_TOP: u16 = 3;
const NOTICE_ROW: u16 = 8;
const WHOLE_SCREEN: u16 = u16::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SelectingDifficulty,
    Running,
    Finished,
    Restarting,
    Quit,
}

/// A key (or the clock) interpreted in the context of the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Choose(Difficulty),
    InvalidChoice,
    GenerationFailed,
    Start,
    Type(char),
    Erase,
    Restart,
    Quit,
    Deadline,
    Completed,
    Ignored,
}

impl SessionEvent {
    pub fn from_key(state: SessionState, key: KeyInput) -> Self {
        match (state, key) {
            (SessionState::Finished | SessionState::Quit, _) => SessionEvent::Ignored,
            (_, KeyInput::Escape) => SessionEvent::Quit,
            (SessionState::SelectingDifficulty, KeyInput::Char(c)) => Difficulty::from_digit(c)
                .map(SessionEvent::Choose)
                .unwrap_or(SessionEvent::InvalidChoice),
            (SessionState::SelectingDifficulty, KeyInput::Enter) => SessionEvent::InvalidChoice,
            (SessionState::SelectingDifficulty, KeyInput::Backspace) => SessionEvent::Ignored,
            (SessionState::Running, KeyInput::Char(RESTART_KEY)) => SessionEvent::Restart,
            (SessionState::Running, KeyInput::Char(c)) => SessionEvent::Type(c),
            (SessionState::Running, KeyInput::Backspace) => SessionEvent::Erase,
            (SessionState::Running, KeyInput::Enter) => SessionEvent::Start,
            (SessionState::Restarting, _) => SessionEvent::Ignored,
        }
    }
}

/// Next state for `event`. Side effects live in [`SessionController`].
pub fn transition(state: SessionState, event: &SessionEvent) -> SessionState {
    use SessionEvent as E;
    use SessionState as S;

    match (state, event) {
        (S::SelectingDifficulty, E::Choose(_)) => S::Running,
        (S::SelectingDifficulty | S::Running, E::Quit) => S::Quit,
        (S::Running, E::Restart) => S::Restarting,
        (S::Running, E::GenerationFailed) => S::SelectingDifficulty,
        (S::Running, E::Deadline | E::Completed) => S::Finished,
        (S::Restarting, _) => S::SelectingDifficulty,
        (state, _) => state,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub time_limit: Duration,
    pub max_passage_words: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            max_passage_words: MAX_PASSAGE_WORDS,
        }
    }
}

/// Everything scoped to one passage; dropped on restart or quit.
#[derive(Debug)]
struct ActiveSession {
    difficulty: Difficulty,
    passage: Passage,
    layout: PassageLayout,
    tracker: InputTracker,
    clock: Option<SessionClock>,
}

/// Drives one program run: menu, timed passage, and the final report.
pub struct SessionController<R, C> {
    pool: WordPool,
    generator: PassageGenerator,
    time_limit: Duration,
    rng: R,
    clock: C,
    state: SessionState,
    active: Option<ActiveSession>,
    notice: Option<String>,
    report: Option<FinalReport>,
}

impl<R: Rng, C: Clock> SessionController<R, C> {
    pub fn new(pool: WordPool, settings: SessionSettings, rng: R, clock: C) -> Self {
        Self {
            pool,
            generator: PassageGenerator::new(settings.max_passage_words),
            time_limit: settings.time_limit,
            rng,
            clock,
            state: SessionState::SelectingDifficulty,
            active: None,
            notice: None,
            report: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn passage(&self) -> Option<&Passage> {
        self.active.as_ref().map(|a| &a.passage)
    }

    pub fn tracker(&self) -> Option<&InputTracker> {
        self.active.as_ref().map(|a| &a.tracker)
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.active.as_ref().map(|a| a.difficulty)
    }

    pub fn has_started(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.clock.is_some())
    }

    /// Message shown under the menu, e.g. after an invalid choice
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn report(&self) -> Option<&FinalReport> {
        self.report.as_ref()
    }

    /// Live statistics for the passage in progress
    pub fn live_stats(&self) -> Option<Stats> {
        let active = self.active.as_ref()?;
        let elapsed = active
            .clock
            .map(|c| c.elapsed(&self.clock))
            .unwrap_or_default();
        Some(Stats::compute(&active.passage, &active.tracker, elapsed))
    }

    /// Draws the view for the current state from scratch.
    pub fn redraw<S: Screen>(&self, screen: &mut S) {
        match self.state {
            SessionState::SelectingDifficulty | SessionState::Restarting => self.draw_menu(screen),
            SessionState::Running => self.draw_passage(screen),
            SessionState::Finished => {
                if let Some(report) = &self.report {
                    screen.draw_stats(&report.stats);
                }
            }
            SessionState::Quit => {}
        }
    }

    /// Selects `difficulty` as if its digit had been pressed on the menu.
    pub fn choose<S: Screen>(&mut self, difficulty: Difficulty, screen: &mut S) -> SessionState {
        self.apply(SessionEvent::Choose(difficulty), screen)
    }

    pub fn handle_key<S: Screen>(&mut self, key: KeyInput, screen: &mut S) -> SessionState {
        let event = if self.deadline_passed() {
            SessionEvent::Deadline
        } else {
            SessionEvent::from_key(self.state, key)
        };
        self.apply(event, screen)
    }

    pub fn apply<S: Screen>(&mut self, event: SessionEvent, screen: &mut S) -> SessionState {
        let next = transition(self.state, &event);

        match event {
            SessionEvent::Choose(difficulty) if next == SessionState::Running => {
                self.state = next;
                self.begin(difficulty, screen);
            }
            SessionEvent::InvalidChoice => {
                self.notice = Some("Invalid Input. Enter between 1 and 3".to_string());
                self.draw_menu(screen);
            }
            SessionEvent::Start => self.start_clock(screen),
            SessionEvent::Type(c) => self.type_char(c, screen),
            SessionEvent::Erase => self.erase(screen),
            SessionEvent::Restart if next == SessionState::Restarting => {
                self.state = next;
                self.restart(screen);
            }
            SessionEvent::Quit if next == SessionState::Quit => {
                tracing::info!("session quit");
                self.state = next;
                self.active = None;
            }
            SessionEvent::Deadline | SessionEvent::Completed if next == SessionState::Finished => {
                self.state = next;
                self.finish(event, screen);
            }
            _ => self.state = next,
        }

        self.state
    }

    fn deadline_passed(&self) -> bool {
        self.state == SessionState::Running
            && self
                .active
                .as_ref()
                .and_then(|a| a.clock)
                .is_some_and(|c| c.timed_out(&self.clock))
    }

    fn begin<S: Screen>(&mut self, difficulty: Difficulty, screen: &mut S) {
        let profile = difficulty.profile();
        match self.generator.generate(&self.pool, &profile, &mut self.rng) {
            Ok(passage) => {
                tracing::info!(%difficulty, words = passage.words().len(), "passage ready");
                let layout = PassageLayout::wrap(passage.words(), screen.display_width());
                self.active = Some(ActiveSession {
                    difficulty,
                    tracker: InputTracker::new(passage.text()),
                    passage,
                    layout,
                    clock: None,
                });
                self.notice = None;
                self.draw_passage(screen);
            }
            Err(err) => {
                tracing::warn!(%difficulty, %err, "passage generation failed");
                self.active = None;
                self.notice = Some(format!("{difficulty}: {err}"));
                self.state = transition(self.state, &SessionEvent::GenerationFailed);
                self.draw_menu(screen);
            }
        }
    }

    fn start_clock<S: Screen>(&mut self, screen: &mut S) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.clock.is_some() {
            return;
        }
        active.clock = Some(SessionClock::start(&self.clock, self.time_limit));
        tracing::info!(difficulty = %active.difficulty, "session started");
        self.draw_live_stats(screen);
    }

    fn type_char<S: Screen>(&mut self, c: char, screen: &mut S) {
        let Some(active) = self.active.as_mut().filter(|a| a.clock.is_some()) else {
            return;
        };
        if let Some(fb) = active.tracker.on_character(c) {
            if let Some((row, col)) = active.layout.cell(fb.position) {
                screen.draw_char(PASSAGE_TOP + row, col, fb.char, fb.outcome);
            }
        }
        let complete = active.tracker.is_complete();

        self.draw_live_stats(screen);
        if complete {
            self.apply(SessionEvent::Completed, screen);
        }
    }

    fn erase<S: Screen>(&mut self, screen: &mut S) {
        let Some(active) = self.active.as_mut().filter(|a| a.clock.is_some()) else {
            return;
        };
        if let Some(Redraw { erased, cells }) = active.tracker.on_backspace() {
            if let (Some((row, col)), Some(expected)) =
                (active.layout.cell(erased), active.passage.char_at(erased))
            {
                screen.draw_text(PASSAGE_TOP + row, col, &expected.to_string(), Tone::Pending);
            }
            for fb in cells {
                if let Some((row, col)) = active.layout.cell(fb.position) {
                    screen.draw_char(PASSAGE_TOP + row, col, fb.char, fb.outcome);
                }
            }
        }
        self.draw_live_stats(screen);
    }

    fn restart<S: Screen>(&mut self, screen: &mut S) {
        tracing::info!("session restarted");
        self.active = None;
        self.notice = None;
        self.report = None;
        self.state = transition(self.state, &SessionEvent::Ignored);
        self.draw_menu(screen);
    }

    fn finish<S: Screen>(&mut self, cause: SessionEvent, screen: &mut S) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let elapsed = active
            .clock
            .map(|c| c.capped_elapsed(&self.clock))
            .unwrap_or_default();
        let stats = Stats::compute(&active.passage, &active.tracker, elapsed);
        tracing::info!(
            ?cause,
            wpm = stats.whole_wpm(),
            keystrokes = stats.keystrokes,
            mistakes = stats.mistakes,
            accuracy = stats.accuracy,
            "session finished"
        );

        screen.draw_stats(&stats);
        self.report = Some(FinalReport {
            difficulty: active.difficulty,
            elapsed,
            stats,
        });
    }

    fn draw_live_stats<S: Screen>(&self, screen: &mut S) {
        if let Some(stats) = self.live_stats() {
            screen.draw_stats(&stats);
        }
    }

    fn draw_menu<S: Screen>(&self, screen: &mut S) {
        screen.clear_region(0, WHOLE_SCREEN);
        screen.draw_text(0, 0, "Select Difficulty:", Tone::Prompt);
        for (i, d) in Difficulty::ALL.iter().enumerate() {
            screen.draw_text(1 + i as u16, 0, &format!("{}.{}", d.digit(), d), Tone::Option);
        }
        screen.draw_text(4, 0, "Press 4 to restart anytime", Tone::Info);
        screen.draw_text(5, 0, "Press enter to start", Tone::Info);
        screen.draw_text(6, 0, "Press ESC to quit anytime", Tone::Info);
        if let Some(notice) = &self.notice {
            screen.draw_text(NOTICE_ROW, 0, notice, Tone::Info);
        }
    }

    fn draw_passage<S: Screen>(&self, screen: &mut S) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        screen.clear_region(0, WHOLE_SCREEN);
        screen.draw_text(
            0,
            0,
            &format!("Difficulty: {}", active.difficulty),
            Tone::Prompt,
        );
        let help = if active.clock.is_some() {
            "Press 4 to restart, ESC to quit"
        } else {
            "Press enter to start, 4 to restart, ESC to quit"
        };
        screen.draw_text(1, 0, help, Tone::Info);
        for (row, line) in active.layout.lines().iter().enumerate() {
            screen.draw_text(PASSAGE_TOP + row as u16, 0, line, Tone::Pending);
        }
        for fb in active.tracker.feedback() {
            if let Some((row, col)) = active.layout.cell(fb.position) {
                screen.draw_char(PASSAGE_TOP + row, col, fb.char, fb.outcome);
            }
        }
        if active.clock.is_some() {
            self.draw_live_stats(screen);
        }
    }
}
