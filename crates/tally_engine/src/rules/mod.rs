//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are kept apart from round
//! bookkeeping so they can be called and tested on their own.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, Line, find_winning_line};
