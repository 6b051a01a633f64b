//! Tally engine - tic-tac-toe rounds with a running score
//!
//! A pure, synchronous state machine: no I/O and no clock. Randomness for the
//! automated player is supplied by the caller.
//!
//! # Architecture
//!
//! - **Rules**: standalone win and draw detection over a [`Board`]
//! - **Round**: [`RoundState`] and its move transition
//! - **Engine**: scores, names, automated-player mode and the generation
//!   counter that invalidates stale automated moves
//!
//! # Example
//!
//! ```
//! use tally_engine::{Engine, Mark, MoveOutcome, RoundNotification};
//!
//! let mut engine = Engine::default();
//! for index in [0, 3, 1, 4] {
//!     engine.apply_move(index);
//! }
//! let outcome = engine.apply_move(2);
//! assert!(matches!(
//!     outcome,
//!     MoveOutcome::Finished(RoundNotification::RoundWon { mark: Mark::X, .. })
//! ));
//! assert_eq!(engine.scores().wins(Mark::X), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod engine;
mod error;
mod position;
mod round;
mod score;
mod snapshot;
mod types;

pub mod rules;

pub use ai::choose_ai_move;
pub use engine::{Engine, MoveOutcome, RoundNotification, ScheduledMove};
pub use error::MoveRejection;
pub use position::Position;
pub use round::{RoundResult, RoundState};
pub use rules::{LINES, Line, find_winning_line, is_full};
pub use score::{PlayerNames, ScoreBoard};
pub use snapshot::EngineSnapshot;
pub use types::{Board, Mark, Square};
