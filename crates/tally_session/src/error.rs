//! Session error types.

use derive_more::{Display, Error};

/// Errors returned by [`crate::SessionHandle`] calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The session task has stopped and can no longer take commands.
    #[display("Game session is closed")]
    ActorClosed,
}
