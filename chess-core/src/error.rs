//! Error types for board and game operations

use crate::pieces::Color;
use crate::position::Position;

/// Recoverable failures reported by the rule engine
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid position: {0:?}")]
    InvalidPosition(String),

    #[error("no piece at {0}")]
    NoPieceAtSource(Position),

    #[error("the piece belongs to {piece}, but it is {active}'s turn")]
    WrongColorTurn { piece: Color, active: Color },

    #[error("invalid move: {from} -> {to}")]
    InvalidMove { from: Position, to: Position },

    #[error("square {0} is already occupied")]
    SquareOccupied(Position),
}
