//! Game state: active player, move dispatch and win detection

use crate::board::Board;
use crate::error::ChessError;
use crate::pieces::Color;
use crate::position::Position;

/// A game in progress (board plus whose turn it is)
#[derive(Clone, Debug, Default)]
pub struct Game {
    board: Board,
    active_player: Color,
}

impl Game {
    /// New game from the standard layout, white to move
    pub fn new() -> Self {
        Self::with_board(Board::new(), Color::White)
    }

    /// Resume from an arbitrary board
    pub fn with_board(board: Board, active_player: Color) -> Self {
        Self {
            board,
            active_player,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Color allowed to move
    pub fn active_player(&self) -> Color {
        self.active_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    // ========================================================================
    // TURNS
    // ========================================================================

    /// Move a piece of the active player and pass the turn.
    pub fn attempt_move(&mut self, source: Position, target: Position) -> Result<(), ChessError> {
        let piece = self
            .board
            .get_piece(source)
            .ok_or(ChessError::NoPieceAtSource(source))?;

        if piece.color != self.active_player {
            return Err(ChessError::WrongColorTurn {
                piece: piece.color,
                active: self.active_player,
            });
        }

        self.board.move_piece(source, target)?;
        self.next_player();
        Ok(())
    }

    fn next_player(&mut self) {
        self.active_player = self.active_player.opponent();
    }

    /// Back to the starting layout with white to move
    pub fn reset(&mut self) {
        self.board.reset_to_standard_layout();
        self.active_player = Color::White;
    }

    // ========================================================================
    // RESULT
    // ========================================================================

    /// The player whose opponent has lost their king.
    ///
    /// Black's king is checked first, so a board with no kings at all
    /// reports a white win.
    pub fn winner(&self) -> Option<Color> {
        if !self.board.has_king(Color::Black) {
            Some(Color::White)
        } else if !self.board.has_king(Color::White) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }
}
