#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    fn of(typed: char, expected: char) -> Self {
        if typed == expected {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Correctness of the character typed at `position`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub position: usize,
    pub char: char,
    pub outcome: Outcome,
}

/// Emitted after a backspace: the erased position plus every surviving
/// character with its stored correctness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redraw {
    pub erased: usize,
    pub cells: Vec<Feedback>,
}

/// Typed-so-far state for one passage
#[derive(Debug, Clone)]
pub struct InputTracker {
    reference: Vec<char>,
    input: Vec<char>,
    mistake_map: Vec<bool>,
    keystrokes: usize,
    mistakes: usize,
}

impl InputTracker {
    pub fn new(reference: &str) -> Self {
        let reference: Vec<char> = reference.chars().collect();
        Self {
            input: Vec::with_capacity(reference.len()),
            mistake_map: Vec::with_capacity(reference.len()),
            reference,
            keystrokes: 0,
            mistakes: 0,
        }
    }

    /// Records `c` at the cursor. Ignored once the whole reference is typed.
    pub fn on_character(&mut self, c: char) -> Option<Feedback> {
        let x = self.cursor();
        let expected = *self.reference.get(x)?;
        let outcome = Outcome::of(c, expected);

        self.mistake_map.push(outcome == Outcome::Incorrect);
        self.input.push(c);
        self.keystrokes += 1;
        if outcome == Outcome::Incorrect {
            self.mistakes += 1;
        }

        tracing::trace!(position = x, ?outcome, "character typed");
        Some(Feedback {
            position: x,
            char: c,
            outcome,
        })
    }

    /// Removes the last typed character and retracts its keystroke and mistake.
    pub fn on_backspace(&mut self) -> Option<Redraw> {
        self.input.pop()?;
        if self.mistake_map.pop().unwrap_or(false) {
            self.mistakes -= 1;
        }
        self.keystrokes -= 1;

        let erased = self.cursor();
        tracing::trace!(position = erased, "character erased");
        Some(Redraw {
            erased,
            cells: self.feedback().collect(),
        })
    }

    /// Stored correctness for every typed position, in order
    pub fn feedback(&self) -> impl Iterator<Item = Feedback> + '_ {
        self.input
            .iter()
            .zip(&self.mistake_map)
            .enumerate()
            .map(|(position, (&char, &wrong))| Feedback {
                position,
                char,
                outcome: if wrong {
                    Outcome::Incorrect
                } else {
                    Outcome::Correct
                },
            })
    }

    pub fn cursor(&self) -> usize {
        self.input.len()
    }

    pub fn input(&self) -> String {
        self.input.iter().collect()
    }

    pub fn keystrokes(&self) -> usize {
        self.keystrokes
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn mistake_map(&self) -> &[bool] {
        &self.mistake_map
    }

    pub fn is_complete(&self) -> bool {
        self.input.len() >= self.reference.len()
    }
}
