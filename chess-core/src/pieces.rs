//! Piece definitions and movement rules

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Player color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row a pawn of this color starts on (zero-based)
    fn pawn_home_row(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Row delta of a forward pawn step
    fn forward(self) -> i16 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// The six piece kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

/// Static description of a piece kind
#[derive(Clone, Debug)]
pub struct KindInfo {
    pub kind: PieceKind,
    pub name: &'static str,
    pub letter: char,
    pub white_glyph: char,
    pub black_glyph: char,
    pub can_jump: bool,
}

impl KindInfo {
    const fn new(
        kind: PieceKind,
        name: &'static str,
        letter: char,
        white_glyph: char,
        black_glyph: char,
        can_jump: bool,
    ) -> Self {
        Self {
            kind,
            name,
            letter,
            white_glyph,
            black_glyph,
            can_jump,
        }
    }
}

/// All piece kinds, indexed by `PieceKind as usize`
pub static PIECE_KINDS: [KindInfo; 6] = [
    KindInfo::new(PieceKind::Pawn, "Pawn", 'P', '\u{2659}', '\u{265f}', false),
    KindInfo::new(PieceKind::Rook, "Rook", 'R', '\u{2656}', '\u{265c}', false),
    KindInfo::new(PieceKind::Knight, "Knight", 'N', '\u{2658}', '\u{265e}', true),
    KindInfo::new(PieceKind::Bishop, "Bishop", 'B', '\u{2657}', '\u{265d}', false),
    KindInfo::new(PieceKind::Queen, "Queen", 'Q', '\u{2655}', '\u{265b}', false),
    KindInfo::new(PieceKind::King, "King", 'K', '\u{2654}', '\u{265a}', false),
];

/// Get the static description of a kind
pub fn kind_info(kind: PieceKind) -> &'static KindInfo {
    &PIECE_KINDS[kind as usize]
}

/// A piece: kind and color only. The board owns positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    /// Whether the piece ignores pieces standing in its way
    pub fn can_jump(&self) -> bool {
        kind_info(self.kind).can_jump
    }

    /// Unicode chess glyph for this piece
    pub fn glyph(&self) -> char {
        let info = kind_info(self.kind);
        match self.color {
            Color::White => info.white_glyph,
            Color::Black => info.black_glyph,
        }
    }

    /// ASCII letter, uppercase for white and lowercase for black
    pub fn letter(&self) -> char {
        let letter = kind_info(self.kind).letter;
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    /// Geometric legality of a plain move, ignoring the board contents
    pub fn can_move_towards(&self, source: Position, target: Position) -> bool {
        let (dcol, drow) = source.delta(target);

        match self.kind {
            PieceKind::Pawn => pawn_advance(self.color, source, dcol, drow),
            PieceKind::Rook => rook_line(dcol, drow),
            PieceKind::Knight => knight_jump(dcol, drow),
            PieceKind::Bishop => bishop_diagonal(dcol, drow),
            PieceKind::Queen => rook_line(dcol, drow) || bishop_diagonal(dcol, drow),
            PieceKind::King => king_step(dcol, drow),
        }
    }

    /// Geometric legality of a capture, ignoring the board contents
    pub fn can_take_over(&self, source: Position, target: Position) -> bool {
        match self.kind {
            PieceKind::Pawn => {
                let (dcol, drow) = source.delta(target);
                dcol.abs() == 1 && drow == self.color.forward()
            }
            _ => self.can_move_towards(source, target),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, kind_info(self.kind).name)
    }
}

// ============================================================================
// MOVEMENT RULES
// ============================================================================

fn pawn_advance(color: Color, source: Position, dcol: i16, drow: i16) -> bool {
    if dcol != 0 {
        return false;
    }
    let forward = color.forward();
    drow == forward || (source.row == color.pawn_home_row() && drow == 2 * forward)
}

fn rook_line(dcol: i16, drow: i16) -> bool {
    (dcol == 0) != (drow == 0)
}

fn knight_jump(dcol: i16, drow: i16) -> bool {
    matches!((dcol.abs(), drow.abs()), (1, 2) | (2, 1))
}

fn bishop_diagonal(dcol: i16, drow: i16) -> bool {
    dcol != 0 && dcol.abs() == drow.abs()
}

fn king_step(dcol: i16, drow: i16) -> bool {
    dcol.abs().max(drow.abs()) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(token: &str) -> Position {
        token.parse().unwrap()
    }

    fn piece(kind: PieceKind, color: Color) -> Piece {
        Piece::new(kind, color)
    }

    #[test]
    fn test_kind_table_order() {
        for (i, info) in PIECE_KINDS.iter().enumerate() {
            assert_eq!(info.kind as usize, i, "{} is out of place", info.name);
        }
    }

    #[test]
    fn test_only_knight_jumps() {
        for info in &PIECE_KINDS {
            assert_eq!(info.can_jump, info.kind == PieceKind::Knight, "{}", info.name);
        }
    }

    #[test]
    fn test_white_pawn_moves() {
        let pawn = piece(PieceKind::Pawn, Color::White);
        assert!(pawn.can_move_towards(pos("e2"), pos("e3")));
        assert!(pawn.can_move_towards(pos("e2"), pos("e4")));
        assert!(!pawn.can_move_towards(pos("e3"), pos("e5")));
        assert!(!pawn.can_move_towards(pos("e3"), pos("e2")));
        assert!(!pawn.can_move_towards(pos("e2"), pos("d3")));
    }

    #[test]
    fn test_black_pawn_moves() {
        let pawn = piece(PieceKind::Pawn, Color::Black);
        assert!(pawn.can_move_towards(pos("d7"), pos("d6")));
        assert!(pawn.can_move_towards(pos("d7"), pos("d5")));
        assert!(!pawn.can_move_towards(pos("d6"), pos("d4")));
        assert!(!pawn.can_move_towards(pos("d6"), pos("d7")));
    }

    #[test]
    fn test_pawn_captures_diagonally_forward() {
        let white = piece(PieceKind::Pawn, Color::White);
        assert!(white.can_take_over(pos("e2"), pos("d3")));
        assert!(white.can_take_over(pos("e2"), pos("f3")));
        assert!(!white.can_take_over(pos("e2"), pos("e3")));
        assert!(!white.can_take_over(pos("e3"), pos("d2")));

        let black = piece(PieceKind::Pawn, Color::Black);
        assert!(black.can_take_over(pos("e7"), pos("f6")));
        assert!(!black.can_take_over(pos("e7"), pos("f8")));
    }

    #[test]
    fn test_rook_lines() {
        let rook = piece(PieceKind::Rook, Color::White);
        assert!(rook.can_move_towards(pos("d1"), pos("d8")));
        assert!(rook.can_move_towards(pos("d1"), pos("a1")));
        assert!(!rook.can_move_towards(pos("d1"), pos("e2")));
        assert!(!rook.can_move_towards(pos("d1"), pos("d1")));
    }

    #[test]
    fn test_knight_jumps() {
        let knight = piece(PieceKind::Knight, Color::Black);
        assert!(knight.can_move_towards(pos("b1"), pos("a3")));
        assert!(knight.can_move_towards(pos("b1"), pos("c3")));
        assert!(knight.can_move_towards(pos("b1"), pos("d2")));
        assert!(!knight.can_move_towards(pos("g1"), pos("g3")));
        assert!(!knight.can_move_towards(pos("b1"), pos("c2")));
    }

    #[test]
    fn test_bishop_diagonals() {
        let bishop = piece(PieceKind::Bishop, Color::White);
        assert!(bishop.can_move_towards(pos("c1"), pos("h6")));
        assert!(bishop.can_move_towards(pos("c1"), pos("a3")));
        assert!(!bishop.can_move_towards(pos("c1"), pos("c3")));
        assert!(!bishop.can_move_towards(pos("c1"), pos("c1")));
    }

    #[test]
    fn test_king_single_steps() {
        let king = piece(PieceKind::King, Color::White);
        for target in ["d1", "d2", "e2", "f2", "f1"] {
            assert!(king.can_move_towards(pos("e1"), pos(target)), "e1 -> {target}");
        }
        assert!(!king.can_move_towards(pos("e1"), pos("e1")));
        assert!(!king.can_move_towards(pos("e1"), pos("e3")));
        assert!(!king.can_move_towards(pos("e1"), pos("f8")));
    }

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        let queen = piece(PieceKind::Queen, Color::White);
        assert!(queen.can_move_towards(pos("d1"), pos("d7")));
        assert!(queen.can_move_towards(pos("d1"), pos("h5")));
        assert!(!queen.can_move_towards(pos("d1"), pos("e3")));
        assert!(!queen.can_move_towards(pos("d1"), pos("d1")));
    }

    #[test]
    fn test_non_pawns_capture_like_they_move() {
        for kind in [PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen, PieceKind::King] {
            let p = piece(kind, Color::White);
            for target in Position::all() {
                assert_eq!(
                    p.can_take_over(pos("d4"), target),
                    p.can_move_towards(pos("d4"), target),
                    "{p} d4 -> {target}"
                );
            }
        }
    }

    #[test]
    fn test_far_off_board_targets_are_rejected() {
        let source = Position::new(-100, -100);
        let target = Position::new(100, 100);
        for info in PIECE_KINDS.iter() {
            let piece = Piece::new(info.kind, Color::White);
            let diagonal = matches!(info.kind, PieceKind::Bishop | PieceKind::Queen);
            assert_eq!(piece.can_move_towards(source, target), diagonal, "{}", info.name);
            assert!(!piece.can_move_towards(Position::new(i8::MIN, 0), Position::new(i8::MAX, 1)));
        }
        let pawn = Piece::new(PieceKind::Pawn, Color::Black);
        assert!(!pawn.can_take_over(Position::new(i8::MAX, i8::MIN), Position::new(i8::MIN, i8::MAX)));
    }

    #[test]
    fn test_letters_and_glyphs() {
        assert_eq!(piece(PieceKind::Knight, Color::White).letter(), 'N');
        assert_eq!(piece(PieceKind::Knight, Color::Black).letter(), 'n');
        assert_eq!(piece(PieceKind::King, Color::White).glyph(), '\u{2654}');
        assert_eq!(piece(PieceKind::Queen, Color::Black).to_string(), "black Queen");
    }
}
