//! State of a single round and its pure transitions.

use crate::rules::{Line, find_winning_line, is_full};
use crate::{Board, Mark, MoveRejection, Position, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundResult {
    /// `mark` completed `line`.
    Won {
        /// The winning mark.
        mark: Mark,
        /// The line it completed.
        line: Line,
    },
    /// Every square filled without a winning line.
    Draw,
}

impl RoundResult {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            RoundResult::Won { mark, .. } => Some(*mark),
            RoundResult::Draw => None,
        }
    }
}

/// Board, turn and outcome of the round being played.
///
/// A fresh round has an empty board with X to move. Each accepted move
/// produces a new state; once a result is recorded the state is terminal and
/// every further move is rejected until a new round starts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct RoundState {
    /// The board.
    board: Board,
    /// Mark to move next (the mark that moved last once the round is over).
    current_mark: Mark,
    /// Result, set at the terminal transition.
    result: Option<RoundResult>,
    /// Indices played this round, in order.
    history: Vec<usize>,
}

impl RoundState {
    /// Creates a fresh round.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the round has been won or drawn.
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// The completed line, if the round was won.
    pub fn winning_line(&self) -> Option<Line> {
        match self.result {
            Some(RoundResult::Won { line, .. }) => Some(line),
            _ => None,
        }
    }

    /// The winning mark; `None` while in progress and on a draw.
    pub fn winning_mark(&self) -> Option<Mark> {
        self.result.and_then(|r| r.winner())
    }

    /// Checks whether `current_mark` may be placed at `pos`.
    pub fn validate(&self, pos: Position) -> Result<(), MoveRejection> {
        if self.is_over() {
            return Err(MoveRejection::RoundOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveRejection::CellOccupied(pos));
        }
        Ok(())
    }

    /// Places `current_mark` at `pos` and returns the next state.
    ///
    /// The second element is `Some` exactly when this move ended the round.
    /// `self` is left untouched, so a rejected move has no effect.
    #[instrument(skip(self), fields(mark = %self.current_mark))]
    pub fn apply_move(
        &self,
        pos: Position,
    ) -> Result<(RoundState, Option<RoundResult>), MoveRejection> {
        self.validate(pos)?;

        let mark = self.current_mark;
        let mut next = self.clone();
        next.board.set(pos, Square::Occupied(mark));
        next.history.push(pos.to_index());

        let result = if let Some((line, winner)) = find_winning_line(&next.board) {
            Some(RoundResult::Won { mark: winner, line })
        } else if is_full(&next.board) {
            Some(RoundResult::Draw)
        } else {
            next.current_mark = mark.opponent();
            None
        };
        next.result = result;

        Ok((next, result))
    }
}
