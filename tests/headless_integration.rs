use std::io;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use typetest::{
    clock::ManualClock,
    runtime::{KeyInput, KeySource, Runner, ScriptedKeySource, SessionOutcome},
    screen::{DrawCall, RecordingScreen},
    tracker::Outcome,
    word_pool::{PoolLimits, WordPool},
    Difficulty, SessionController, SessionSettings, SessionState,
};

// Headless integration using the runtime + controller without a TTY

fn controller_with(words: &[&str], clock: &ManualClock) -> SessionController<StdRng, ManualClock> {
    SessionController::new(
        WordPool::load(words.iter().copied(), &PoolLimits::default()),
        SessionSettings::default(),
        StdRng::seed_from_u64(11),
        clock.clone(),
    )
}

/// Advances the clock by a fixed step before handing out each key
struct PacedKeys {
    inner: ScriptedKeySource,
    clock: ManualClock,
    step: Duration,
}

impl KeySource for PacedKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyInput>> {
        self.clock.advance(self.step);
        self.inner.next_key()
    }
}

#[test]
fn headless_typing_flow_completes() {
    let clock = ManualClock::new();
    let mut controller = controller_with(&["cat"], &clock);
    let mut screen = RecordingScreen::default();

    // pick Easy, start, then type 20 x "cat"
    let passage = vec!["cat"; 20].join(" ");
    let script = format!("1\n{passage}");
    let mut runner = Runner::new(PacedKeys {
        inner: ScriptedKeySource::from_script(&script),
        clock: clock.clone(),
        step: Duration::from_millis(100),
    });

    let outcome = runner.run(&mut controller, &mut screen).unwrap();

    let SessionOutcome::Finished(report) = outcome else {
        panic!("expected a finished session");
    };
    assert_eq!(report.difficulty, Difficulty::Easy);
    assert_eq!(report.stats.keystrokes, passage.len());
    assert_eq!(report.stats.mistakes, 0);
    assert_eq!(report.stats.accuracy, 100.0);
    assert!(report.stats.wpm > 0.0);
    assert!(report.stats.cps > 0.0);
    assert!(report.to_string().starts_with("Final Statistics\nWPM: "));
    assert_eq!(controller.state(), SessionState::Finished);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let clock = ManualClock::new();
    let mut controller = controller_with(&["cat"], &clock);
    let mut screen = RecordingScreen::default();

    // 25 s per key: the third key after Enter arrives past the deadline
    let mut runner = Runner::new(PacedKeys {
        inner: ScriptedKeySource::from_script("1\ncatcatcat"),
        clock: clock.clone(),
        step: Duration::from_secs(25),
    });

    let outcome = runner.run(&mut controller, &mut screen).unwrap();
    let SessionOutcome::Finished(report) = outcome else {
        panic!("expected timeout to finish the session");
    };
    assert_eq!(report.elapsed, Duration::from_secs(60));
    assert_eq!(report.stats.keystrokes, 2);
    assert!(runner.into_inner().inner.remaining() > 0);
}

#[test]
fn headless_quit_has_no_report() {
    let clock = ManualClock::new();
    let mut controller = controller_with(&["cat"], &clock);
    let mut screen = RecordingScreen::default();

    let mut runner = Runner::new(ScriptedKeySource::from_script("1\nca\u{1b}tt"));
    let outcome = runner.run(&mut controller, &mut screen).unwrap();

    assert_eq!(outcome, SessionOutcome::Quit);
    assert!(controller.report().is_none());
    assert_eq!(runner.into_inner().remaining(), 2);
}

#[test]
fn headless_exhausted_keys_count_as_quit() {
    let clock = ManualClock::new();
    let mut controller = controller_with(&["cat"], &clock);
    let mut screen = RecordingScreen::default();

    let outcome = Runner::new(ScriptedKeySource::from_script("1\nc"))
        .run(&mut controller, &mut screen)
        .unwrap();
    assert_eq!(outcome, SessionOutcome::Quit);
}

#[test]
fn headless_restart_then_finish() {
    let clock = ManualClock::new();
    let mut controller = controller_with(&["cat", "apple"], &clock);
    let mut screen = RecordingScreen::default();

    // mistakes on an Easy passage, restart, then a clean Medium passage
    let medium = vec!["apple"; 40].join(" ");
    let mut runner = Runner::new(ScriptedKeySource::from_script("1\nxyz4\u{1b}"));
    // ESC after restart quits from the menu
    assert_eq!(
        runner.run(&mut controller, &mut screen).unwrap(),
        SessionOutcome::Quit
    );

    let mut controller = controller_with(&["cat", "apple"], &clock);
    let script = format!("1\nxyz42\n{medium}");
    let outcome = Runner::new(ScriptedKeySource::from_script(&script))
        .run(&mut controller, &mut screen)
        .unwrap();
    let SessionOutcome::Finished(report) = outcome else {
        panic!("expected finished session after restart");
    };
    assert_eq!(report.difficulty, Difficulty::Medium);
    assert_eq!(report.stats.mistakes, 0);
    assert_eq!(report.stats.keystrokes, medium.len());
}

#[test]
fn headless_preselected_difficulty_skips_menu() {
    let clock = ManualClock::new();
    let mut controller = controller_with(&["cat"], &clock);
    let mut screen = RecordingScreen::default();

    assert_eq!(
        controller.choose(Difficulty::Easy, &mut screen),
        SessionState::Running
    );
    let outcome = Runner::new(ScriptedKeySource::from_script("\nc\u{1b}"))
        .run(&mut controller, &mut screen)
        .unwrap();
    assert_eq!(outcome, SessionOutcome::Quit);
    assert!(screen.shows_text("Difficulty: Easy"));
}

#[test]
fn headless_feedback_reaches_the_screen() {
    let clock = ManualClock::new();
    let mut controller = controller_with(&["cat"], &clock);
    let mut screen = RecordingScreen::new(20);

    Runner::new(ScriptedKeySource::from_script("1\ncx"))
        .run(&mut controller, &mut screen)
        .unwrap();

    let chars: Vec<_> = screen
        .calls()
        .iter()
        .filter_map(|call| match call {
            DrawCall::Char { ch, outcome, .. } => Some((*ch, *outcome)),
            _ => None,
        })
        .collect();
    assert_eq!(chars, vec![('c', Outcome::Correct), ('x', Outcome::Incorrect)]);
    assert!(screen.presents() >= 4);
}
