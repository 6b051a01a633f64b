//! Tally session - a running tic-tac-toe session around [`tally_engine`]
//!
//! # Architecture
//!
//! - **Actor**: one tokio task owns the [`tally_engine::Engine`]; commands
//!   arrive through a [`SessionHandle`]
//! - **Automated player**: a delayed move scheduled as a cancellable timer,
//!   tied to the engine generation it was chosen for
//! - **Events**: [`SessionEvent`]s for the presentation layer
//! - **Config**: [`SessionConfig`] from TOML
//!
//! # Example
//!
//! ```no_run
//! use tally_session::{SessionConfig, SessionEvent, spawn};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = SessionConfig::default().with_ai_enabled(true);
//! let (session, mut events) = spawn(&config);
//! session.apply_move(4).await?;
//! while let Some(event) = events.recv().await {
//!     if let SessionEvent::StateChanged { snapshot } = event {
//!         println!("{:?}", snapshot.board);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod actor;
mod config;
mod error;
mod event;

pub use actor::{SessionHandle, spawn};
pub use config::{ConfigError, SessionConfig};
pub use error::SessionError;
pub use event::SessionEvent;
