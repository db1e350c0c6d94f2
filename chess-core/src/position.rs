//! Board coordinates and straight-line geometry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;

/// Number of columns and rows on the board
pub const BOARD_SIZE: i8 = 8;

/// Column letters in board order
const COLUMN_LETTERS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// A board coordinate, stored as zero-based column (a=0) and row (1=0).
///
/// Off-board coordinates are representable so that callers can ask the
/// board about them; use [`Position::is_valid`] before trusting one.
/// Serialized as its two-character token, e.g. `"e4"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { row, col }
    }

    /// Check if this position is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.col) && (0..BOARD_SIZE).contains(&self.row)
    }

    /// All on-board positions, a1..h1 then a2..h2 and so on up to h8
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(col, row)))
    }

    /// (column, row) distance to `target`. Widened so that far off-board
    /// coordinates cannot overflow.
    pub fn delta(&self, target: Position) -> (i16, i16) {
        (
            i16::from(target.col) - i16::from(self.col),
            i16::from(target.row) - i16::from(self.row),
        )
    }

    /// Squares strictly between `self` and `target` in travel order.
    ///
    /// Returns `None` unless the two positions share a row, a column or a
    /// diagonal. Identical or adjacent positions yield an empty list.
    pub fn squares_between(&self, target: Position) -> Option<Vec<Position>> {
        let (dcol, drow) = self.delta(target);

        if dcol != 0 && drow != 0 && dcol.abs() != drow.abs() {
            return None;
        }

        let step_col = dcol.signum();
        let step_row = drow.signum();
        let distance = dcol.abs().max(drow.abs());

        // Interior squares lie between two i8 coordinates, so they fit in i8
        Some(
            (1..distance)
                .map(|i| {
                    Position::new(
                        (i16::from(self.col) + step_col * i) as i8,
                        (i16::from(self.row) + step_row * i) as i8,
                    )
                })
                .collect(),
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = usize::try_from(self.col)
            .ok()
            .and_then(|c| COLUMN_LETTERS.get(c).copied())
            .unwrap_or('?');
        write!(f, "{}{}", letter, i16::from(self.row) + 1)
    }
}

impl FromStr for Position {
    type Err = ChessError;

    /// Parse a token such as `"e4"`; anything off the board is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidPosition(s.to_string());

        let mut chars = s.trim().chars();
        let (letter, digit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(letter), Some(digit), None) => (letter.to_ascii_lowercase(), digit),
            _ => return Err(invalid()),
        };

        let col = COLUMN_LETTERS
            .iter()
            .position(|&c| c == letter)
            .ok_or_else(invalid)?;
        let row = digit
            .to_digit(10)
            .filter(|d| (1..=BOARD_SIZE as u32).contains(d))
            .ok_or_else(invalid)?;

        Ok(Position::new(col as i8, row as i8 - 1))
    }
}

impl TryFrom<String> for Position {
    type Error = ChessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}
