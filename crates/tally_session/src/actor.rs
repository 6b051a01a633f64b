//! Single-writer session task owning the engine.
//!
//! Every mutation, human or automated, goes through one mailbox, so the
//! engine never sees two changes at once and each round produces exactly one
//! terminal event. The automated player's delayed move is a spawned timer
//! task tagged with the engine generation it was chosen under. Any change to
//! that generation aborts the timer, and the engine refuses the move if it
//! still arrives.

use crate::{SessionConfig, SessionError, SessionEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tally_engine::{Engine, EngineSnapshot, Mark, MoveOutcome, ScheduledMove};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Requests understood by the session task.
#[derive(Debug)]
enum Command {
    ApplyMove {
        index: usize,
        reply: oneshot::Sender<MoveOutcome>,
    },
    ResetRound {
        reply: oneshot::Sender<()>,
    },
    ResetScores {
        reply: oneshot::Sender<()>,
    },
    SetPlayerName {
        mark: Mark,
        name: String,
        reply: oneshot::Sender<()>,
    },
    SetAiMode {
        enabled: bool,
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<EngineSnapshot>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Cloneable handle for sending commands to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
}

/// Starts a session task on the current tokio runtime.
///
/// Returns the command handle and the stream of events for the presentation
/// layer. The task stops when [`SessionHandle::shutdown`] is called or every
/// handle has been dropped.
#[instrument(skip(config))]
pub fn spawn(config: &SessionConfig) -> (SessionHandle, mpsc::UnboundedReceiver<SessionEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (ai_tx, ai_rx) = mpsc::unbounded_channel();

    let rng = match config.rng_seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    let actor = SessionActor {
        engine: Engine::new(config.player_names(), *config.ai_enabled()),
        rng,
        ai_delay: config.ai_delay(),
        events: event_tx,
        ai_tx,
        pending_ai: None,
    };

    info!(
        ai_enabled = config.ai_enabled(),
        ai_delay_ms = config.ai_delay_ms(),
        "Starting game session"
    );
    tokio::spawn(actor.run(cmd_rx, ai_rx));

    (SessionHandle { commands: cmd_tx }, event_rx)
}

impl SessionHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .map_err(|_| SessionError::ActorClosed)?;
        response.await.map_err(|_| SessionError::ActorClosed)
    }

    /// Places the current mark at `index` (0-8).
    #[instrument(skip(self))]
    pub async fn apply_move(&self, index: usize) -> Result<MoveOutcome, SessionError> {
        self.request(|reply| Command::ApplyMove { index, reply })
            .await
    }

    /// Starts a new round, keeping scores.
    #[instrument(skip(self))]
    pub async fn reset_round(&self) -> Result<(), SessionError> {
        self.request(|reply| Command::ResetRound { reply }).await
    }

    /// Zeroes scores and starts a new round.
    #[instrument(skip(self))]
    pub async fn reset_scores(&self) -> Result<(), SessionError> {
        self.request(|reply| Command::ResetScores { reply }).await
    }

    /// Renames the player behind `mark`.
    #[instrument(skip(self, name))]
    pub async fn set_player_name(
        &self,
        mark: Mark,
        name: impl Into<String>,
    ) -> Result<(), SessionError> {
        let name = name.into();
        self.request(|reply| Command::SetPlayerName { mark, name, reply })
            .await
    }

    /// Turns the automated O player on or off.
    #[instrument(skip(self))]
    pub async fn set_ai_mode(&self, enabled: bool) -> Result<(), SessionError> {
        self.request(|reply| Command::SetAiMode { enabled, reply })
            .await
    }

    /// Current engine state.
    pub async fn snapshot(&self) -> Result<EngineSnapshot, SessionError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Stops the session task, cancelling any pending automated move.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.request(|reply| Command::Shutdown { reply }).await
    }
}

/// Timer task for an automated move.
#[derive(Debug)]
struct PendingAiMove {
    generation: u64,
    timer: JoinHandle<()>,
}

struct SessionActor {
    engine: Engine,
    rng: StdRng,
    ai_delay: Duration,
    events: mpsc::UnboundedSender<SessionEvent>,
    ai_tx: mpsc::UnboundedSender<ScheduledMove>,
    pending_ai: Option<PendingAiMove>,
}

impl SessionActor {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut ai_moves: mpsc::UnboundedReceiver<ScheduledMove>,
    ) {
        self.sync_ai_schedule();

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown { reply }) => {
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => self.handle(command),
                    None => {
                        debug!("All session handles dropped");
                        break;
                    }
                },
                Some(scheduled) = ai_moves.recv() => self.handle_ai_move(scheduled),
            }
            self.sync_ai_schedule();
        }

        self.cancel_pending_ai();
        info!("Game session stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::ApplyMove { index, reply } => {
                let outcome = self.engine.apply_move(index);
                self.publish_outcome(&outcome);
                let _ = reply.send(outcome);
            }
            Command::ResetRound { reply } => {
                self.engine.reset_round();
                self.publish_state();
                let _ = reply.send(());
            }
            Command::ResetScores { reply } => {
                self.engine.reset_scores();
                self.publish_state();
                let _ = reply.send(());
            }
            Command::SetPlayerName { mark, name, reply } => {
                self.engine.set_player_name(mark, name);
                self.publish_state();
                let _ = reply.send(());
            }
            Command::SetAiMode { enabled, reply } => {
                self.engine.set_ai_mode(enabled);
                self.publish_state();
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
            Command::Shutdown { reply } => {
                // Handled by the run loop.
                let _ = reply.send(());
            }
        }
    }

    #[instrument(skip(self), fields(generation = self.engine.generation()))]
    fn handle_ai_move(&mut self, scheduled: ScheduledMove) {
        if self
            .pending_ai
            .as_ref()
            .is_some_and(|pending| pending.generation == scheduled.generation)
        {
            self.pending_ai = None;
        }
        let outcome = self.engine.apply_scheduled_move(scheduled);
        if outcome.is_accepted() {
            info!(position = %scheduled.position, "Automated player moved");
        }
        self.publish_outcome(&outcome);
    }

    /// Brings the timer in line with the engine.
    ///
    /// A timer for the current generation is left running; anything else is
    /// aborted, and a new one is started if the automated player is due.
    fn sync_ai_schedule(&mut self) {
        let generation = self.engine.generation();
        if self
            .pending_ai
            .as_ref()
            .is_some_and(|pending| pending.generation == generation)
        {
            return;
        }
        self.cancel_pending_ai();

        let Some(scheduled) = self.engine.schedule_ai_move(&mut self.rng) else {
            return;
        };
        let delay = self.ai_delay;
        let ai_tx = self.ai_tx.clone();
        debug!(
            generation,
            position = %scheduled.position,
            delay_ms = delay.as_millis() as u64,
            "Scheduling automated move"
        );
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if ai_tx.send(scheduled).is_err() {
                debug!("Session gone before automated move fired");
            }
        });
        self.pending_ai = Some(PendingAiMove { generation, timer });
    }

    fn cancel_pending_ai(&mut self) {
        if let Some(pending) = self.pending_ai.take() {
            debug!(generation = pending.generation, "Cancelling pending automated move");
            pending.timer.abort();
        }
    }

    fn publish_outcome(&self, outcome: &MoveOutcome) {
        if !outcome.is_accepted() {
            return;
        }
        self.publish_state();
        if let Some(notification) = outcome.notification() {
            self.publish(SessionEvent::from(notification.clone()));
        }
    }

    fn publish_state(&self) {
        self.publish(SessionEvent::StateChanged {
            snapshot: self.engine.snapshot(),
        });
    }

    fn publish(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            warn!("Event receiver dropped; event discarded");
        }
    }
}
