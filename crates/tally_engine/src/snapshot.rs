//! Read-only view of the engine handed to the presentation layer.

use crate::{Engine, Mark};
use serde::{Deserialize, Serialize};

/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Cells in row-major order.
    pub board: [Option<Mark>; 9],
    /// Mark to move next.
    pub current_mark: Mark,
    /// Whether the round is won or drawn.
    pub is_over: bool,
    /// Indices of the completed line.
    pub winning_line: Option<[usize; 3]>,
    /// Winner, absent on a draw.
    pub winning_mark: Option<Mark>,
    /// Wins for X.
    pub score_x: u32,
    /// Wins for O.
    pub score_o: u32,
    /// Drawn rounds.
    pub draws: u32,
    /// Display name for X.
    pub name_x: String,
    /// Display name for O.
    pub name_o: String,
    /// Whether O is played automatically.
    pub ai_mode: bool,
    /// Engine state version.
    pub generation: u64,
}

impl From<&Engine> for EngineSnapshot {
    fn from(engine: &Engine) -> Self {
        Self {
            board: engine.board().cells(),
            current_mark: engine.current_mark(),
            is_over: engine.is_over(),
            winning_line: engine.winning_line().map(|line| line.indices()),
            winning_mark: engine.winning_mark(),
            score_x: engine.scores().wins(Mark::X),
            score_o: engine.scores().wins(Mark::O),
            draws: engine.scores().draws(),
            name_x: engine.names().get(Mark::X).to_string(),
            name_o: engine.names().get(Mark::O).to_string(),
            ai_mode: engine.ai_mode(),
            generation: engine.generation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_board_as_nullable_marks() {
        let mut engine = Engine::default();
        engine.apply_move(4);
        let json = serde_json::to_value(engine.snapshot()).expect("serializable");
        assert_eq!(json["board"][4], "X");
        assert!(json["board"][0].is_null());
        assert_eq!(json["current_mark"], "O");
        assert_eq!(json["is_over"], false);
    }
}
