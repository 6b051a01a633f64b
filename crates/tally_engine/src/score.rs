//! Session-scoped tallies and player names.

use crate::Mark;
use serde::{Deserialize, Serialize};

/// Wins per mark, plus drawn rounds.
///
/// Counts only ever go up, except through [`ScoreBoard::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    x: u32,
    o: u32,
    draws: u32,
}

impl ScoreBoard {
    /// An all-zero score board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Rounds that ended in a draw.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Records one win for `mark`.
    pub fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x = self.x.saturating_add(1),
            Mark::O => self.o = self.o.saturating_add(1),
        }
    }

    /// Records one drawn round.
    pub fn record_draw(&mut self) {
        self.draws = self.draws.saturating_add(1);
    }

    /// Zeroes every count.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Display name for each mark. Free text, empty allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNames {
    x: String,
    o: String,
}

impl PlayerNames {
    /// Names for X and O.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// Name shown for `mark`.
    pub fn get(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }

    /// Replaces the name for `mark`.
    pub fn set(&mut self, mark: Mark, name: impl Into<String>) {
        match mark {
            Mark::X => self.x = name.into(),
            Mark::O => self.o = name.into(),
        }
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self::new("Player X", "Player O")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wins_are_tracked_per_mark() {
        let mut scores = ScoreBoard::new();
        scores.record_win(Mark::O);
        scores.record_win(Mark::O);
        scores.record_win(Mark::X);
        assert_eq!(scores.wins(Mark::X), 1);
        assert_eq!(scores.wins(Mark::O), 2);
        assert_eq!(scores.draws(), 0);
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut scores = ScoreBoard::new();
        scores.record_win(Mark::X);
        scores.record_draw();
        scores.clear();
        assert_eq!(scores, ScoreBoard::new());
    }

    #[test]
    fn test_names_accept_empty_text() {
        let mut names = PlayerNames::default();
        names.set(Mark::O, "");
        assert_eq!(names.get(Mark::O), "");
        assert_eq!(names.get(Mark::X), "Player X");
    }
}
