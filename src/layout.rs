/// Where each passage character sits on screen, relative to the passage origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageLayout {
    cells: Vec<(u16, u16)>,
    lines: Vec<String>,
}

impl PassageLayout {
    /// Wraps words onto lines of `width` columns. A word moves to the next
    /// line when it and its trailing space would reach the right edge; a word
    /// that is alone on its line stays there even if it overflows.
    pub fn wrap<S: AsRef<str>>(words: &[S], width: u16) -> Self {
        let width = usize::from(width.max(1));
        let mut cells = Vec::new();
        let mut lines: Vec<String> = vec![String::new()];
        let mut row = 0usize;
        let mut col = 0usize;

        for (i, word) in words.iter().enumerate() {
            let word = word.as_ref();
            let len = word.chars().count();
            if col > 0 && col + len + 1 >= width {
                row += 1;
                col = 0;
                lines.push(String::new());
            }

            let line = &mut lines[row];
            for c in word.chars() {
                cells.push((clamp(row), clamp(col)));
                line.push(c);
                col += 1;
            }
            if i + 1 < words.len() {
                cells.push((clamp(row), clamp(col)));
                line.push(' ');
                col += 1;
            }
        }

        Self { cells, lines }
    }

    /// (row, col) of passage character `position`
    pub fn cell(&self, position: usize) -> Option<(u16, u16)> {
        self.cells.get(position).copied()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

fn clamp(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_when_it_fits() {
        let layout = PassageLayout::wrap(&["cat", "dog"], 80);
        assert_eq!(layout.lines(), ["cat dog"]);
        assert_eq!(layout.cell(0), Some((0, 0)));
        assert_eq!(layout.cell(3), Some((0, 3)));
        assert_eq!(layout.cell(6), Some((0, 6)));
        assert_eq!(layout.cell(7), None);
    }

    #[test]
    fn wraps_before_the_right_edge() {
        // "cat " fills columns 0..4; "dog" + space would reach column 8 == width
        let layout = PassageLayout::wrap(&["cat", "dog", "emu"], 8);
        assert_eq!(layout.lines(), ["cat ", "dog ", "emu"]);
        assert_eq!(layout.cell(4), Some((1, 0)));
        assert_eq!(layout.cell(7), Some((1, 3)));
        assert_eq!(layout.cell(8), Some((2, 0)));
    }

    #[test]
    fn every_character_has_a_cell() {
        let words = ["alpha", "beta", "gamma", "delta", "epsilon"];
        let text_len = words.join(" ").chars().count();
        let layout = PassageLayout::wrap(&words, 12);
        assert!(layout.cell(text_len - 1).is_some());
        assert!(layout.cell(text_len).is_none());
        assert_eq!(layout.lines().concat(), words.join(" "));
    }

    #[test]
    fn overlong_word_stays_on_its_own_line() {
        let layout = PassageLayout::wrap(&["extraordinary", "a"], 5);
        assert_eq!(layout.lines(), ["extraordinary ", "a"]);
    }
}
