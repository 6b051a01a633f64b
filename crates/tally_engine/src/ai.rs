//! Random-move automated player.

use crate::{Board, Position};
use rand::Rng;
use tracing::{debug, instrument};

/// Picks an empty square uniformly at random.
///
/// Returns `None` when the board is full. There is no look-ahead: every
/// empty square is equally likely, winning or blocking moves included.
#[instrument(skip(board, rng))]
pub fn choose_ai_move<R: Rng>(board: &Board, rng: &mut R) -> Option<Position> {
    let empty = board.empty_positions();
    if empty.is_empty() {
        debug!("No empty squares for automated move");
        return None;
    }
    let pos = empty[rng.random_range(0..empty.len())];
    debug!(position = %pos, candidates = empty.len(), "Automated player chose position");
    Some(pos)
}
