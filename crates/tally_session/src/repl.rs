//! Line-oriented terminal front end.

use anyhow::Result;
use derive_more::{Display, Error};
use tally_engine::{Board, EngineSnapshot, Mark, MoveOutcome};
use tally_session::{SessionEvent, SessionHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// A line typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Play the square with this 0-based index.
    Move(usize),
    /// Start the next round.
    NextRound,
    /// Zero the scores.
    ResetScores,
    /// Rename a player.
    Name(Mark, String),
    /// Toggle the computer player.
    Ai(bool),
    /// Print the current state.
    State,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognised input: {:?} (type 'help')", input)]
pub struct ParseError {
    /// The offending line.
    pub input: String,
}

const HELP: &str = "\
Commands:
  1-9              place your mark (squares numbered left-to-right, top-to-bottom)
  next             start the next round
  reset-scores     zero both scores and restart the round
  name x|o TEXT    rename a player (empty TEXT allowed)
  ai on|off        let the computer play O
  state            show the board
  help             show this list
  quit             leave";

impl std::str::FromStr for ReplCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        let err = || ParseError {
            input: trimmed.to_string(),
        };
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        match word.to_lowercase().as_str() {
            "next" | "n" => Ok(ReplCommand::NextRound),
            "reset-scores" => Ok(ReplCommand::ResetScores),
            "state" | "s" => Ok(ReplCommand::State),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
            "ai" => match rest.to_lowercase().as_str() {
                "on" => Ok(ReplCommand::Ai(true)),
                "off" => Ok(ReplCommand::Ai(false)),
                _ => Err(err()),
            },
            "name" => {
                let (who, name) = match rest.split_once(char::is_whitespace) {
                    Some((who, name)) => (who, name.trim()),
                    None => (rest, ""),
                };
                let mark = match who.to_lowercase().as_str() {
                    "x" => Mark::X,
                    "o" => Mark::O,
                    _ => return Err(err()),
                };
                Ok(ReplCommand::Name(mark, name.to_string()))
            }
            digits => match digits.parse::<usize>() {
                Ok(n) if (1..=9).contains(&n) && rest.is_empty() => Ok(ReplCommand::Move(n - 1)),
                _ => Err(err()),
            },
        }
    }
}

/// Reads commands from stdin and prints session events until `quit` or EOF.
#[instrument(skip_all, fields(json = json))]
pub async fn run(
    session: SessionHandle,
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    json: bool,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !json {
        println!("{HELP}\n");
        render_state(&session.snapshot().await?);
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<ReplCommand>() {
                    Ok(ReplCommand::Quit) => break,
                    Ok(command) => execute(&session, command).await?,
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some(event) = events.recv() => print_event(&event, json)?,
        }
    }

    info!("Leaving game");
    session.shutdown().await?;
    Ok(())
}

async fn execute(session: &SessionHandle, command: ReplCommand) -> Result<()> {
    match command {
        ReplCommand::Move(index) => {
            if let MoveOutcome::Rejected(reason) = session.apply_move(index).await? {
                eprintln!("{reason}");
            }
        }
        ReplCommand::NextRound => session.reset_round().await?,
        ReplCommand::ResetScores => session.reset_scores().await?,
        ReplCommand::Name(mark, name) => session.set_player_name(mark, name).await?,
        ReplCommand::Ai(enabled) => session.set_ai_mode(enabled).await?,
        ReplCommand::State => render_state(&session.snapshot().await?),
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Quit => {}
    }
    Ok(())
}

fn print_event(event: &SessionEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        SessionEvent::StateChanged { snapshot } => render_state(snapshot),
        SessionEvent::RoundWon { mark, display_name } => {
            println!("{display_name} ({mark}) wins the round! Type 'next' to play again.\n");
        }
        SessionEvent::RoundDraw => println!("It's a draw! Type 'next' to play again.\n"),
    }
    Ok(())
}

fn render_state(snapshot: &EngineSnapshot) {
    println!("{}", Board::from(snapshot.board).display());
    println!(
        "{} (X): {}   {} (O): {}{}   draws: {}",
        snapshot.name_x,
        snapshot.score_x,
        snapshot.name_o,
        snapshot.score_o,
        if snapshot.ai_mode { " [computer]" } else { "" },
        snapshot.draws,
    );
    if !snapshot.is_over {
        let name = match snapshot.current_mark {
            Mark::X => &snapshot.name_x,
            Mark::O => &snapshot.name_o,
        };
        println!("{name} ({}) to move\n", snapshot.current_mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_map_to_zero_based_moves() {
        assert_eq!("1".parse::<ReplCommand>(), Ok(ReplCommand::Move(0)));
        assert_eq!(" 9 ".parse::<ReplCommand>(), Ok(ReplCommand::Move(8)));
        assert!("0".parse::<ReplCommand>().is_err());
        assert!("10".parse::<ReplCommand>().is_err());
    }

    #[test]
    fn test_name_allows_spaces_and_empty() {
        assert_eq!(
            "name o Deep Blue".parse::<ReplCommand>(),
            Ok(ReplCommand::Name(Mark::O, "Deep Blue".to_string()))
        );
        assert_eq!("name X".parse::<ReplCommand>(), Ok(ReplCommand::Name(Mark::X, String::new())));
        assert!("name z Bob".parse::<ReplCommand>().is_err());
    }

    #[test]
    fn test_ai_toggle() {
        assert_eq!("ai on".parse::<ReplCommand>(), Ok(ReplCommand::Ai(true)));
        assert_eq!("AI OFF".parse::<ReplCommand>(), Ok(ReplCommand::Ai(false)));
        assert!("ai maybe".parse::<ReplCommand>().is_err());
    }
}
