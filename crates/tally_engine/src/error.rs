//! Reasons a move request is turned away.

use crate::Position;
use derive_more::{Display, Error};

/// Why a move was rejected.
///
/// Rejections never change engine state and never emit a notification.
/// They are reported so callers can log them; nothing treats them as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveRejection {
    /// The index does not name a board cell.
    #[display("Index {} is off the board (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// The square at the position is already taken.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] Position),

    /// The round has already been won or drawn.
    #[display("Round is already over")]
    RoundOver,

    /// A scheduled automated move outlived the state it was chosen for.
    #[display("Scheduled move for generation {} is stale (now {})", scheduled, current)]
    StaleGeneration {
        /// Generation the move was chosen under.
        scheduled: u64,
        /// Generation at the time it arrived.
        current: u64,
    },

    /// The automated player was asked to move when it is not its turn.
    #[display("Not the automated player's turn")]
    NotAutomatedTurn,
}
