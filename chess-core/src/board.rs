//! Board state: piece placement, path clearance, move validation and execution

use rustc_hash::FxHashMap;

use crate::error::ChessError;
use crate::pieces::{Color, Piece, PieceKind};
use crate::position::Position;

/// Back-rank order from column a to column h
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Pieces on the board plus the pieces taken so far
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Board: position -> piece (sparse representation)
    pieces: FxHashMap<Position, Piece>,

    /// Captured pieces, in capture order
    captured: Vec<Piece>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Board in the standard starting layout
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset_to_standard_layout();
        board
    }

    /// Board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Self {
            pieces: FxHashMap::default(),
            captured: Vec::new(),
        }
    }

    /// Put back all 32 pieces and forget the captures
    pub fn reset_to_standard_layout(&mut self) {
        self.pieces.clear();
        self.captured.clear();

        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as i8;
            self.pieces.insert(Position::new(col, 0), Piece::new(kind, Color::White));
            self.pieces.insert(Position::new(col, 1), Piece::new(PieceKind::Pawn, Color::White));
            self.pieces.insert(Position::new(col, 6), Piece::new(PieceKind::Pawn, Color::Black));
            self.pieces.insert(Position::new(col, 7), Piece::new(kind, Color::Black));
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn is_position_valid(&self, position: Position) -> bool {
        position.is_valid()
    }

    /// Get piece at position
    pub fn get_piece(&self, position: Position) -> Option<Piece> {
        self.pieces.get(&position).copied()
    }

    pub fn piece_color(&self, position: Position) -> Option<Color> {
        self.get_piece(position).map(|piece| piece.color)
    }

    /// Iterate pieces on board (unordered)
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces.iter().map(|(&position, &piece)| (position, piece))
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Pieces taken so far, oldest first
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    /// Whether a king of `color` is still on the board
    pub fn has_king(&self, color: Color) -> bool {
        self.pieces
            .values()
            .any(|piece| piece.is_king() && piece.color == color)
    }

    // ========================================================================
    // SETUP
    // ========================================================================

    /// Place a piece on an empty, on-board square
    pub fn place_piece(&mut self, position: Position, piece: Piece) -> Result<(), ChessError> {
        if !self.is_position_valid(position) {
            return Err(ChessError::InvalidPosition(position.to_string()));
        }
        if self.pieces.contains_key(&position) {
            return Err(ChessError::SquareOccupied(position));
        }
        self.pieces.insert(position, piece);
        Ok(())
    }

    /// Take a piece off the board. This is not a capture.
    pub fn remove_piece(&mut self, position: Position) -> Option<Piece> {
        self.pieces.remove(&position)
    }

    /// Append to the capture log directly (snapshot restore)
    pub(crate) fn push_captured(&mut self, piece: Piece) {
        self.captured.push(piece);
    }

    // ========================================================================
    // MOVE VALIDATION
    // ========================================================================

    /// Whether no piece stands strictly between `source` and `target`.
    ///
    /// Always false for positions that are not on a common line.
    pub fn free_path_between(&self, source: Position, target: Position) -> bool {
        match source.squares_between(target) {
            Some(squares) => squares.iter().all(|sq| !self.pieces.contains_key(sq)),
            None => false,
        }
    }

    /// Check whether the piece on `source` may move to `target`
    pub fn is_move_valid(&self, source: Position, target: Position) -> bool {
        let piece = match self.get_piece(source) {
            Some(p) => p,
            None => return false,
        };

        if !self.is_position_valid(target) {
            return false;
        }

        if !piece.can_jump() && !self.free_path_between(source, target) {
            return false;
        }

        match self.get_piece(target) {
            Some(occupant) if occupant.color == piece.color => false,
            Some(_) => piece.can_take_over(source, target),
            None => piece.can_move_towards(source, target),
        }
    }

    /// Every square the piece on `source` may move to, a1..h8
    pub fn valid_targets(&self, source: Position) -> Vec<Position> {
        Position::all()
            .filter(|&target| self.is_move_valid(source, target))
            .collect()
    }

    // ========================================================================
    // MOVE EXECUTION
    // ========================================================================

    /// Move a piece, capturing whatever stands on `target`.
    ///
    /// Nothing changes when the move is invalid. Returns the captured piece.
    pub fn move_piece(&mut self, source: Position, target: Position) -> Result<Option<Piece>, ChessError> {
        if !self.is_move_valid(source, target) {
            return Err(ChessError::InvalidMove { from: source, to: target });
        }

        let piece = self
            .pieces
            .remove(&source)
            .ok_or(ChessError::NoPieceAtSource(source))?;

        let captured = self.pieces.insert(target, piece);
        if let Some(taken) = captured {
            self.captured.push(taken);
        }

        Ok(captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(token: &str) -> Position {
        token.parse().unwrap()
    }

    fn board_with(setup: &[(&str, PieceKind, Color)]) -> Board {
        let mut board = Board::empty();
        for &(token, kind, color) in setup {
            board.place_piece(pos(token), Piece::new(kind, color)).unwrap();
        }
        board
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::new();
        assert_eq!(board.piece_count(), 32);
        assert!(board.captured_pieces().is_empty());
        assert_eq!(board.get_piece(pos("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.get_piece(pos("e8")), Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(board.get_piece(pos("d1")), Some(Piece::new(PieceKind::Queen, Color::White)));
        assert_eq!(board.get_piece(pos("g8")), Some(Piece::new(PieceKind::Knight, Color::Black)));

        for col in 0..8 {
            assert_eq!(board.get_piece(Position::new(col, 1)), Some(Piece::new(PieceKind::Pawn, Color::White)));
            assert_eq!(board.get_piece(Position::new(col, 6)), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            for row in 2..6 {
                assert_eq!(board.get_piece(Position::new(col, row)), None);
            }
        }
    }

    #[test]
    fn test_place_piece_rejects_bad_squares() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::White);
        assert!(board.place_piece(pos("a1"), rook).is_ok());
        assert_eq!(board.place_piece(pos("a1"), rook), Err(ChessError::SquareOccupied(pos("a1"))));
        assert_eq!(
            board.place_piece(Position::new(0, 8), rook),
            Err(ChessError::InvalidPosition("a9".to_string()))
        );
    }

    #[test]
    fn test_free_path() {
        let board = Board::new();
        assert!(board.free_path_between(pos("a2"), pos("a7")));
        assert!(!board.free_path_between(pos("a1"), pos("a3")));
        assert!(!board.free_path_between(pos("c1"), pos("a3")));
        assert!(board.free_path_between(pos("c1"), pos("d2")));
        assert!(board.free_path_between(pos("e4"), pos("e4")));
        // Knight-shaped pairs are never on a line
        assert!(!board.free_path_between(pos("b1"), pos("c3")));
    }

    #[test]
    fn test_far_off_board_path_and_move() {
        let board = board_with(&[("d1", PieceKind::Rook, Color::White)]);
        assert!(!board.free_path_between(Position::new(-100, 0), Position::new(100, 0)));
        assert!(board.free_path_between(Position::new(-100, 5), Position::new(100, 5)));
        assert!(!board.free_path_between(Position::new(i8::MIN, 0), Position::new(i8::MAX, 1)));
        assert!(!board.is_move_valid(pos("d1"), Position::new(3, i8::MAX)));
        assert!(!board.is_move_valid(Position::new(i8::MIN, i8::MIN), pos("d4")));
        assert!(board.valid_targets(Position::new(-100, 0)).is_empty());
    }

    #[test]
    fn test_piece_color() {
        let board = Board::new();
        assert_eq!(board.piece_color(pos("a1")), Some(Color::White));
        assert_eq!(board.piece_color(pos("h7")), Some(Color::Black));
        assert_eq!(board.piece_color(pos("e4")), None);
        assert_eq!(board.piece_color(Position::new(3, 8)), None);
    }

    #[test]
    fn test_rook_moves_on_open_file() {
        let board = board_with(&[
            ("d1", PieceKind::Rook, Color::White),
            ("g1", PieceKind::Knight, Color::White),
            ("d6", PieceKind::Pawn, Color::White),
        ]);
        assert!(board.is_move_valid(pos("d1"), pos("d4")));
        assert!(!board.is_move_valid(pos("d1"), Position::new(3, 8)));
        assert!(!board.is_move_valid(pos("d1"), pos("d6")));
        assert!(!board.is_move_valid(pos("d1"), pos("d7")));
        assert!(!board.is_move_valid(pos("d1"), pos("h1")));
    }

    #[test]
    fn test_knight_jumps_in_opening() {
        let board = Board::new();
        assert!(board.is_move_valid(pos("b1"), pos("a3")));
        assert!(board.is_move_valid(pos("b1"), pos("c3")));
        assert!(!board.is_move_valid(pos("b1"), pos("d2")));
    }

    #[test]
    fn test_bishop_blocked_in_opening() {
        let board = Board::new();
        assert!(!board.is_move_valid(pos("c1"), pos("a3")));
        assert!(!board.is_move_valid(pos("c1"), pos("e3")));
        assert!(board.valid_targets(pos("c1")).is_empty());
    }

    #[test]
    fn test_pawn_push_and_block() {
        let mut board = Board::new();
        assert!(board.is_move_valid(pos("e2"), pos("e3")));
        assert!(board.is_move_valid(pos("e2"), pos("e4")));
        assert_eq!(board.valid_targets(pos("e2")), vec![pos("e3"), pos("e4")]);

        board.place_piece(pos("e3"), Piece::new(PieceKind::Pawn, Color::Black)).unwrap();
        assert!(!board.is_move_valid(pos("e2"), pos("e3")));
        assert!(!board.is_move_valid(pos("e2"), pos("e4")));
    }

    #[test]
    fn test_pawn_diagonal_capture_needs_enemy() {
        let mut board = Board::new();
        assert!(!board.is_move_valid(pos("e2"), pos("d3")));

        board.place_piece(pos("d3"), Piece::new(PieceKind::Knight, Color::White)).unwrap();
        assert!(!board.is_move_valid(pos("e2"), pos("d3")));

        board.remove_piece(pos("d3"));
        board.place_piece(pos("d3"), Piece::new(PieceKind::Knight, Color::Black)).unwrap();
        assert!(board.is_move_valid(pos("e2"), pos("d3")));
    }

    #[test]
    fn test_empty_source_is_invalid() {
        let board = Board::new();
        assert!(!board.is_move_valid(pos("e4"), pos("e5")));
        assert!(board.valid_targets(pos("e4")).is_empty());
    }

    #[test]
    fn test_move_relocates_piece() {
        let mut board = Board::new();
        assert_eq!(board.move_piece(pos("g1"), pos("f3")), Ok(None));
        assert_eq!(board.get_piece(pos("g1")), None);
        assert_eq!(board.get_piece(pos("f3")), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert_eq!(board.piece_count(), 32);
    }

    #[test]
    fn test_invalid_move_leaves_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();
        assert_eq!(
            board.move_piece(pos("g1"), pos("g3")),
            Err(ChessError::InvalidMove { from: pos("g1"), to: pos("g3") })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_appends_to_log() {
        let mut board = board_with(&[
            ("a1", PieceKind::Rook, Color::White),
            ("a5", PieceKind::Pawn, Color::Black),
            ("h5", PieceKind::Bishop, Color::Black),
        ]);
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let bishop = Piece::new(PieceKind::Bishop, Color::Black);

        assert_eq!(board.move_piece(pos("a1"), pos("a5")), Ok(Some(pawn)));
        assert_eq!(board.move_piece(pos("a5"), pos("h5")), Ok(Some(bishop)));
        assert_eq!(board.captured_pieces(), &[pawn, bishop]);
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_has_king_and_reset() {
        let mut board = Board::new();
        assert!(board.has_king(Color::White));
        assert!(board.has_king(Color::Black));

        board.remove_piece(pos("e8"));
        assert!(!board.has_king(Color::Black));

        board.reset_to_standard_layout();
        assert!(board.has_king(Color::Black));
        assert_eq!(board.piece_count(), 32);
        assert!(board.captured_pieces().is_empty());
    }
}
