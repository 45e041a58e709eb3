use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
    Terminal,
};

use crate::{
    screen::{Screen, Tone},
    stats::Stats,
    tracker::Outcome,
};

const STATS_HEIGHT: u16 = 5;

/// Runs `restore` when terminal setup failed part way through.
fn restore_on_error<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn outcome_style(outcome: Outcome) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match outcome {
        Outcome::Correct => bold.fg(Color::Green),
        Outcome::Incorrect => bold.fg(Color::Red),
    }
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Prompt => Style::default().fg(Color::Yellow),
        Tone::Option => Style::default().fg(Color::Cyan),
        Tone::Info => Style::default().fg(Color::White),
        Tone::Pending => Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::DIM),
    }
}

/// Full-screen terminal output. Draw calls land on an off-screen canvas that
/// `present` copies into the next ratatui frame.
pub struct TerminalScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    canvas: Buffer,
}

impl TerminalScreen {
    /// Switches the terminal to raw mode on the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        restore_on_error(Self::setup(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })
    }

    fn setup() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let size = terminal.size()?;

        Ok(Self {
            terminal,
            canvas: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
        })
    }

    /// Restores the terminal to the state it was in before `enter`.
    pub fn leave(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    fn in_bounds(&self, row: u16, col: u16) -> bool {
        row < self.canvas.area.height && col < self.canvas.area.width
    }
}

impl Screen for TerminalScreen {
    fn display_width(&self) -> u16 {
        self.canvas.area.width
    }

    fn draw_char(&mut self, row: u16, col: u16, ch: char, outcome: Outcome) {
        // a mistyped space would be invisible
        let shown = match (ch, outcome) {
            (' ', Outcome::Incorrect) => '·',
            (c, _) => c,
        };
        if let Some(cell) = self.canvas.cell_mut(Position::new(col, row)) {
            cell.set_char(shown).set_style(outcome_style(outcome));
        }
    }

    fn draw_text(&mut self, row: u16, col: u16, text: &str, tone: Tone) {
        if !self.in_bounds(row, col) {
            return;
        }
        let room = usize::from(self.canvas.area.width - col);
        self.canvas
            .set_stringn(col, row, text, room, tone_style(tone));
    }

    fn clear_region(&mut self, top: u16, height: u16) {
        let area = self.canvas.area;
        let bottom = top.saturating_add(height).min(area.height);
        for y in top..bottom {
            for x in 0..area.width {
                if let Some(cell) = self.canvas.cell_mut(Position::new(x, y)) {
                    cell.reset();
                }
            }
        }
    }

    fn draw_stats(&mut self, stats: &Stats) {
        let area = self.canvas.area;
        let height = STATS_HEIGHT.min(area.height);
        let top = area.height - height;
        self.clear_region(top, height);

        let lines = vec![
            Line::from(format!("WPM: {}", stats.whole_wpm())),
            Line::from(format!("Keystrokes: {}", stats.keystrokes)),
            Line::from(format!("Mistakes: {}", stats.mistakes)),
            Line::from(format!("CPS: {:.2}", stats.cps)),
            Line::from(format!("Accuracy: {:.2}%", stats.accuracy)),
        ];
        Paragraph::new(lines)
            .style(tone_style(Tone::Info))
            .render(Rect::new(0, top, area.width, height), &mut self.canvas);
    }

    fn present(&mut self) -> io::Result<()> {
        let canvas = &self.canvas;
        self.terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            for y in 0..area.height.min(canvas.area.height) {
                for x in 0..area.width.min(canvas.area.width) {
                    let pos = Position::new(x, y);
                    if let (Some(src), Some(dst)) = (canvas.cell(pos), buf.cell_mut(pos)) {
                        *dst = src.clone();
                    }
                }
            }
        })?;
        Ok(())
    }
}
