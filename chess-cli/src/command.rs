//! Session commands - one per line of player input

use std::path::PathBuf;
use std::str::FromStr;

use chess_core::{ChessError, Position};

/// A parsed line of input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move { from: Position, to: Position },
    Hint(Position),
    Board,
    Captured,
    Log,
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    New,
    Help,
    Quit,
}

/// Reasons a line could not be understood
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command: {0:?} (type 'help')")]
    Unknown(String),

    #[error("'{0}' needs a square, e.g. '{0} e2'")]
    MissingSquare(&'static str),

    #[error(transparent)]
    Position(#[from] ChessError),
}

pub const HELP: &str = "\
Commands:
  e2 e4 | e2e4   move a piece
  hint <square>  list the squares a piece can reach
  board          show the board again
  captured       show the captured pieces
  log            show the moves played so far
  save [file]    save the board
  load [file]    load a saved board
  new            start over
  help           show this message
  quit           leave the game

The move timer is checked when you enter a line: an answer sent after
the time is up loses the game, even if you started typing in time.";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let (&first, rest) = words.split_first().ok_or(CommandError::Empty)?;

        let command = match (first.to_ascii_lowercase().as_str(), rest) {
            ("hint", [square]) => Command::Hint(square.parse()?),
            ("hint", _) => return Err(CommandError::MissingSquare("hint")),
            ("board", []) => Command::Board,
            ("captured", []) => Command::Captured,
            ("log", []) => Command::Log,
            ("save", []) => Command::Save(None),
            ("save", [file]) => Command::Save(Some(PathBuf::from(file))),
            ("load", []) => Command::Load(None),
            ("load", [file]) => Command::Load(Some(PathBuf::from(file))),
            ("new", []) => Command::New,
            ("help", []) | ("?", []) => Command::Help,
            ("quit", []) | ("exit", []) => Command::Quit,
            _ => match parse_move(&words) {
                Some(parsed) => parsed?,
                None => return Err(CommandError::Unknown(line.trim().to_string())),
            },
        };

        Ok(command)
    }
}

/// `e2 e4` or `e2e4`; `None` when the line does not have that shape
fn parse_move(words: &[&str]) -> Option<Result<Command, CommandError>> {
    let (from, to) = match words {
        [from, to] if from.len() == 2 && to.len() == 2 => (*from, *to),
        [joined] if joined.len() == 4 && joined.is_ascii() => joined.split_at(2),
        _ => return None,
    };

    Some(parse_pair(from, to))
}

fn parse_pair(from: &str, to: &str) -> Result<Command, CommandError> {
    Ok(Command::Move {
        from: from.parse()?,
        to: to.parse()?,
    })
}
