use std::io;

use crate::{stats::Stats, tracker::Outcome};

/// How plain text should look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Headings and prompts
    Prompt,
    /// Menu options
    Option,
    /// Help lines and notices
    Info,
    /// Reference text not typed yet
    Pending,
}

/// Rendering boundary: the engine decides what goes where, the screen draws it.
pub trait Screen {
    /// Columns available for laying out the passage
    fn display_width(&self) -> u16;

    fn draw_char(&mut self, row: u16, col: u16, ch: char, outcome: Outcome);

    fn draw_text(&mut self, row: u16, col: u16, text: &str, tone: Tone);

    /// Blanks `height` rows starting at `top`
    fn clear_region(&mut self, top: u16, height: u16);

    fn draw_stats(&mut self, stats: &Stats);

    /// Pushes everything drawn so far to the output device.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// What a [`RecordingScreen`] was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Char {
        row: u16,
        col: u16,
        ch: char,
        outcome: Outcome,
    },
    Text {
        row: u16,
        col: u16,
        text: String,
        tone: Tone,
    },
    Clear {
        top: u16,
        height: u16,
    },
    Stats(Stats),
}

/// In-memory screen for headless runs and tests
#[derive(Debug, Clone)]
pub struct RecordingScreen {
    width: u16,
    calls: Vec<DrawCall>,
    presents: usize,
}

impl RecordingScreen {
    pub fn new(width: u16) -> Self {
        Self {
            width,
            calls: Vec::new(),
            presents: 0,
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn last_stats(&self) -> Option<&Stats> {
        self.calls.iter().rev().find_map(|call| match call {
            DrawCall::Stats(stats) => Some(stats),
            _ => None,
        })
    }

    /// Whether any text call contains `needle`
    pub fn shows_text(&self, needle: &str) -> bool {
        self.calls.iter().any(|call| match call {
            DrawCall::Text { text, .. } => text.contains(needle),
            _ => false,
        })
    }
}

impl Default for RecordingScreen {
    fn default() -> Self {
        Self::new(80)
    }
}

impl Screen for RecordingScreen {
    fn display_width(&self) -> u16 {
        self.width
    }

    fn draw_char(&mut self, row: u16, col: u16, ch: char, outcome: Outcome) {
        self.calls.push(DrawCall::Char {
            row,
            col,
            ch,
            outcome,
        });
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str, tone: Tone) {
        self.calls.push(DrawCall::Text {
            row,
            col,
            text: text.to_string(),
            tone,
        });
    }

    fn clear_region(&mut self, top: u16, height: u16) {
        self.calls.push(DrawCall::Clear { top, height });
    }

    fn draw_stats(&mut self, stats: &Stats) {
        self.calls.push(DrawCall::Stats(*stats));
    }

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        Ok(())
    }
}
