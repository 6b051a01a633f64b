//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the eight triples of positions that wins when uniformly occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([Position; 3]);

impl Line {
    /// The three positions, in scan order.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The three board indices, in scan order.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }
}

/// Lines in scan order: rows top-to-bottom, columns left-to-right, then the
/// main and anti diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    Line([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    Line([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    Line([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    Line([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    Line([Position::TopCenter, Position::Center, Position::BottomCenter]),
    Line([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    Line([Position::TopLeft, Position::Center, Position::BottomRight]),
    Line([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Finds the first line held entirely by one mark.
///
/// Returns the line together with the mark holding it, or `None` when no
/// line qualifies.
#[instrument(skip(board))]
pub fn find_winning_line(board: &Board) -> Option<(Line, Mark)> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.positions();
        let square = board.get(a);
        match square {
            Square::Occupied(mark) if board.get(b) == square && board.get(c) == square => {
                Some((*line, mark))
            }
            _ => None,
        }
    })
}
