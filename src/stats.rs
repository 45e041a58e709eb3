use std::fmt;
use std::time::Duration;

use crate::{difficulty::Difficulty, passage::Passage, tracker::InputTracker};

/// Live or final numbers for a session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub wpm: f64,
    pub keystrokes: usize,
    pub mistakes: usize,
    pub cps: f64,
    pub accuracy: f64,
}

impl Stats {
    pub fn compute(passage: &Passage, tracker: &InputTracker, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        let correct_words = correct_word_count(&tracker.input(), passage.words());
        Self {
            wpm: wpm(correct_words, secs / 60.0),
            keystrokes: tracker.keystrokes(),
            mistakes: tracker.mistakes(),
            cps: cps(tracker.keystrokes(), secs),
            accuracy: accuracy(tracker.mistakes(), tracker.keystrokes()),
        }
    }

    /// WPM as a whole number, truncated
    pub fn whole_wpm(&self) -> u64 {
        self.wpm as u64
    }
}

/// Percentage of net keystrokes that were not mistakes; 100 before any input.
pub fn accuracy(mistakes: usize, keystrokes: usize) -> f64 {
    if keystrokes == 0 {
        return 100.0;
    }
    (100.0 - (mistakes as f64 * 100.0 / keystrokes as f64)).clamp(0.0, 100.0)
}

pub fn cps(keystrokes: usize, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    keystrokes as f64 / elapsed_secs
}

pub fn wpm(correct_words: usize, elapsed_minutes: f64) -> f64 {
    if elapsed_minutes <= 0.0 {
        return 0.0;
    }
    correct_words as f64 / elapsed_minutes
}

/// Counts typed tokens that equal the reference word at the same index.
///
/// Runs of spaces separate tokens without producing empty ones, so a doubled
/// space does not shift the comparison. A trailing partial word is compared
/// as-is.
pub fn correct_word_count<S: AsRef<str>>(input: &str, reference: &[S]) -> usize {
    input
        .split(' ')
        .filter(|token| !token.is_empty())
        .zip(reference)
        .filter(|(token, expected)| *token == expected.as_ref())
        .count()
}

/// Summary of a session that ran to completion or timed out.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalReport {
    pub difficulty: Difficulty,
    pub elapsed: Duration,
    pub stats: Stats,
}

impl fmt::Display for FinalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final Statistics")?;
        writeln!(f, "WPM: {}", self.stats.whole_wpm())?;
        writeln!(f, "Keystrokes: {}", self.stats.keystrokes)?;
        writeln!(f, "Mistakes: {}", self.stats.mistakes)?;
        writeln!(f, "CPS: {:.2}", self.stats.cps)?;
        write!(f, "Accuracy: {:.2}%", self.stats.accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_defaults_to_full_without_input() {
        assert_eq!(accuracy(0, 0), 100.0);
    }

    #[test]
    fn accuracy_bounds() {
        assert_eq!(accuracy(0, 10), 100.0);
        assert_eq!(accuracy(10, 10), 0.0);
        assert_eq!(accuracy(1, 4), 75.0);
        for k in 1..20 {
            for m in 0..=k {
                let a = accuracy(m, k);
                assert!((0.0..=100.0).contains(&a));
            }
        }
    }

    #[test]
    fn rates_guard_against_zero_time() {
        assert_eq!(cps(10, 0.0), 0.0);
        assert_eq!(wpm(5, 0.0), 0.0);
        assert_eq!(wpm(5, -1.0), 0.0);
        assert_eq!(cps(10, 2.0), 5.0);
        assert_eq!(wpm(5, 0.5), 10.0);
    }

    #[test]
    fn correct_words_by_position() {
        let reference = ["cat", "dog", "emu"];
        assert_eq!(correct_word_count("cat dog", &reference), 2);
        assert_eq!(correct_word_count("cat dgo emu", &reference), 2);
        assert_eq!(correct_word_count("", &reference), 0);
        // partial trailing word
        assert_eq!(correct_word_count("cat do", &reference), 1);
    }

    #[test]
    fn correct_words_ignore_extra_tokens_and_spaces() {
        let reference = ["cat", "dog"];
        assert_eq!(correct_word_count("cat  dog", &reference), 2);
        assert_eq!(correct_word_count(" cat dog cat", &reference), 2);
    }

    #[test]
    fn scenario_clean_run() {
        let passage = Passage::from_words(vec!["cat".into(), "dog".into()]);
        let mut tracker = InputTracker::new(passage.text());
        for c in "cat dog".chars() {
            tracker.on_character(c);
        }
        let stats = Stats::compute(&passage, &tracker, Duration::from_secs(30));

        assert_eq!(stats.keystrokes, 7);
        assert_eq!(stats.mistakes, 0);
        assert_eq!(stats.accuracy, 100.0);
        assert_eq!(stats.wpm, 4.0);
        assert!((stats.cps - 7.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn stats_before_any_time_passes() {
        let passage = Passage::from_words(vec!["cat".into()]);
        let tracker = InputTracker::new(passage.text());
        let stats = Stats::compute(&passage, &tracker, Duration::ZERO);
        assert_eq!(stats, Stats {
            wpm: 0.0,
            keystrokes: 0,
            mistakes: 0,
            cps: 0.0,
            accuracy: 100.0,
        });
    }

    #[test]
    fn report_format() {
        let report = FinalReport {
            difficulty: Difficulty::Easy,
            elapsed: Duration::from_secs(60),
            stats: Stats {
                wpm: 12.9,
                keystrokes: 80,
                mistakes: 4,
                cps: 1.3333,
                accuracy: 95.0,
            },
        };
        assert_eq!(
            report.to_string(),
            "Final Statistics\nWPM: 12\nKeystrokes: 80\nMistakes: 4\nCPS: 1.33\nAccuracy: 95.00%"
        );
    }
}
