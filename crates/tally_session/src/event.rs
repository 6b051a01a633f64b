//! Events published by a running session.

use serde::{Deserialize, Serialize};
use tally_engine::{EngineSnapshot, Mark, RoundNotification};

/// Something the presentation layer should react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Engine state changed; redraw from the snapshot.
    StateChanged {
        /// State after the change.
        snapshot: EngineSnapshot,
    },
    /// A round was won.
    RoundWon {
        /// The winning mark.
        mark: Mark,
        /// Winner's display name.
        display_name: String,
    },
    /// A round ended in a draw.
    RoundDraw,
}

impl From<RoundNotification> for SessionEvent {
    fn from(notification: RoundNotification) -> Self {
        match notification {
            RoundNotification::RoundWon {
                mark, display_name, ..
            } => SessionEvent::RoundWon { mark, display_name },
            RoundNotification::RoundDraw => SessionEvent::RoundDraw,
        }
    }
}
