//! The game engine: round, scores, names and automated-player mode.

use crate::ai::choose_ai_move;
use crate::rules::Line;
use crate::{
    Board, EngineSnapshot, Mark, MoveRejection, PlayerNames, Position, RoundResult, RoundState,
    ScoreBoard,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Announcement fired when a round reaches its terminal state.
///
/// Exactly one is produced per round, by the move that ends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundNotification {
    /// `mark` completed a line.
    RoundWon {
        /// The winning mark.
        mark: Mark,
        /// Winner's display name at the moment of winning.
        display_name: String,
        /// The completed line.
        line: Line,
    },
    /// The board filled up with no line completed.
    RoundDraw,
}

/// What happened to a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed.
    Rejected(MoveRejection),
    /// Mark placed, turn passed to the other mark.
    Continued,
    /// Mark placed and the round ended.
    Finished(RoundNotification),
}

impl MoveOutcome {
    /// Whether the move changed the board.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    /// The terminal notification, if this move ended the round.
    pub fn notification(&self) -> Option<&RoundNotification> {
        match self {
            MoveOutcome::Finished(n) => Some(n),
            _ => None,
        }
    }
}

/// An automated move chosen for a specific engine generation.
///
/// Only applies if the engine is still at the generation it was chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledMove {
    /// Generation the move was chosen under.
    pub generation: u64,
    /// Square to play.
    pub position: Position,
}

/// Tic-tac-toe engine with score tracking.
///
/// All state changes go through the command methods. Invalid requests are
/// rejected without touching state. The `generation` counter advances on
/// every change that could affect whether, or where, the automated player
/// moves next: accepted moves, resets and mode changes.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    round: RoundState,
    scores: ScoreBoard,
    names: PlayerNames,
    ai_mode: bool,
    generation: u64,
}

impl Engine {
    /// Creates an engine with the given names and automated-player mode.
    #[instrument(skip(names))]
    pub fn new(names: PlayerNames, ai_mode: bool) -> Self {
        Self {
            round: RoundState::new(),
            scores: ScoreBoard::new(),
            names,
            ai_mode,
            generation: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// The round in play.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// The board.
    pub fn board(&self) -> &Board {
        self.round.board()
    }

    /// Mark to move next.
    pub fn current_mark(&self) -> Mark {
        *self.round.current_mark()
    }

    /// Whether the round is won or drawn.
    pub fn is_over(&self) -> bool {
        self.round.is_over()
    }

    /// The completed line, if any.
    pub fn winning_line(&self) -> Option<Line> {
        self.round.winning_line()
    }

    /// The winning mark, absent on a draw or while in progress.
    pub fn winning_mark(&self) -> Option<Mark> {
        self.round.winning_mark()
    }

    /// Win tallies.
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Display names.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// Whether O is played automatically.
    pub fn ai_mode(&self) -> bool {
        self.ai_mode
    }

    /// Current state version.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the automated player is due to move.
    pub fn ai_turn_pending(&self) -> bool {
        self.ai_mode && !self.round.is_over() && self.current_mark() == Mark::O
    }

    /// Serializable view of the whole engine.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::from(self)
    }

    // ─────────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────────

    /// Places the current mark at `index` (0-8).
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        match Position::from_index(index) {
            Some(pos) => self.apply_position(pos),
            None => self.reject(MoveRejection::OutOfBounds(index)),
        }
    }

    /// Places the current mark at `pos`.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_position(&mut self, pos: Position) -> MoveOutcome {
        let (next, result) = match self.round.apply_move(pos) {
            Ok(step) => step,
            Err(rejection) => return self.reject(rejection),
        };
        let mark = self.current_mark();
        self.round = next;
        self.generation += 1;
        debug!(%mark, position = %pos, generation = self.generation, "Move applied");

        match result {
            None => MoveOutcome::Continued,
            Some(RoundResult::Won { mark, line }) => {
                self.scores.record_win(mark);
                let display_name = self.names.get(mark).to_string();
                info!(
                    %mark,
                    name = %display_name,
                    line = ?line.indices(),
                    wins = self.scores.wins(mark),
                    "Round won"
                );
                MoveOutcome::Finished(RoundNotification::RoundWon {
                    mark,
                    display_name,
                    line,
                })
            }
            Some(RoundResult::Draw) => {
                self.scores.record_draw();
                info!(draws = self.scores.draws(), "Round drawn");
                MoveOutcome::Finished(RoundNotification::RoundDraw)
            }
        }
    }

    /// Chooses the automated player's move for the current state.
    ///
    /// Returns `None` unless [`Engine::ai_turn_pending`] holds.
    #[instrument(skip(self, rng), fields(generation = self.generation))]
    pub fn schedule_ai_move<R: Rng>(&self, rng: &mut R) -> Option<ScheduledMove> {
        if !self.ai_turn_pending() {
            return None;
        }
        choose_ai_move(self.board(), rng).map(|position| ScheduledMove {
            generation: self.generation,
            position,
        })
    }

    /// Applies a move chosen by [`Engine::schedule_ai_move`].
    ///
    /// Rejected if anything changed since it was chosen.
    #[instrument(skip(self), fields(current = self.generation))]
    pub fn apply_scheduled_move(&mut self, scheduled: ScheduledMove) -> MoveOutcome {
        if scheduled.generation != self.generation {
            return self.reject(MoveRejection::StaleGeneration {
                scheduled: scheduled.generation,
                current: self.generation,
            });
        }
        if !self.ai_turn_pending() {
            return self.reject(MoveRejection::RoundOver);
        }
        self.apply_position(scheduled.position)
    }

    /// Chooses and plays the automated move right away, skipping the delay.
    ///
    /// Held to the same trigger as the delayed move: mode on, O to move,
    /// round in progress.
    #[instrument(skip(self, rng), fields(generation = self.generation))]
    pub fn play_ai_move<R: Rng>(&mut self, rng: &mut R) -> MoveOutcome {
        if self.round.is_over() {
            return self.reject(MoveRejection::RoundOver);
        }
        match self.schedule_ai_move(rng) {
            Some(scheduled) => self.apply_scheduled_move(scheduled),
            None => self.reject(MoveRejection::NotAutomatedTurn),
        }
    }

    /// Starts a new round. Scores and names are kept.
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) {
        self.round = RoundState::new();
        self.generation += 1;
        info!(generation = self.generation, "Round reset");
    }

    /// Zeroes the scores and starts a new round.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores.clear();
        info!("Scores cleared");
        self.reset_round();
    }

    /// Renames the player behind `mark`. Any text is accepted.
    #[instrument(skip(self, name))]
    pub fn set_player_name(&mut self, mark: Mark, name: impl Into<String>) {
        let name = name.into();
        debug!(%mark, name = %name, "Player renamed");
        self.names.set(mark, name);
    }

    /// Turns the automated O player on or off.
    #[instrument(skip(self))]
    pub fn set_ai_mode(&mut self, enabled: bool) {
        if self.ai_mode == enabled {
            return;
        }
        self.ai_mode = enabled;
        self.generation += 1;
        info!(enabled, generation = self.generation, "Automated player mode changed");
    }

    fn reject(&self, rejection: MoveRejection) -> MoveOutcome {
        debug!(%rejection, "Move rejected");
        MoveOutcome::Rejected(rejection)
    }
}
