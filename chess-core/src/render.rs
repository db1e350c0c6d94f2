//! Text rendering of a board

use crate::board::Board;
use crate::pieces::Piece;
use crate::position::{Position, BOARD_SIZE};

/// Glyph set used for pieces and grid lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Charset {
    #[default]
    Unicode,
    Ascii,
}

struct GridChars {
    top: (&'static str, &'static str, &'static str),
    middle: (&'static str, &'static str, &'static str),
    bottom: (&'static str, &'static str, &'static str),
    horizontal: &'static str,
    vertical: &'static str,
}

const UNICODE_GRID: GridChars = GridChars {
    top: ("\u{250c}", "\u{252c}", "\u{2510}"),
    middle: ("\u{251c}", "\u{253c}", "\u{2524}"),
    bottom: ("\u{2514}", "\u{2534}", "\u{2518}"),
    horizontal: "\u{2500}\u{2500}\u{2500}",
    vertical: "\u{2502}",
};

const ASCII_GRID: GridChars = GridChars {
    top: ("+", "+", "+"),
    middle: ("+", "+", "+"),
    bottom: ("+", "+", "+"),
    horizontal: "---",
    vertical: "|",
};

impl Charset {
    fn grid(self) -> &'static GridChars {
        match self {
            Charset::Unicode => &UNICODE_GRID,
            Charset::Ascii => &ASCII_GRID,
        }
    }

    pub fn piece(self, piece: Piece) -> char {
        match self {
            Charset::Unicode => piece.glyph(),
            Charset::Ascii => piece.letter(),
        }
    }
}

fn grid_line(grid: &GridChars, (left, cross, right): (&str, &str, &str)) -> String {
    let cells = vec![grid.horizontal; BOARD_SIZE as usize].join(cross);
    format!("  {left}{cells}{right}\n")
}

/// Draw the board with row 8 at the top and column labels underneath
pub fn render_board(board: &Board, charset: Charset) -> String {
    let grid = charset.grid();
    let mut out = grid_line(grid, grid.top);

    for row in (0..BOARD_SIZE).rev() {
        out.push_str(&format!("{} {}", row + 1, grid.vertical));
        for col in 0..BOARD_SIZE {
            let cell = board
                .get_piece(Position::new(col, row))
                .map(|piece| charset.piece(piece))
                .unwrap_or(' ');
            out.push_str(&format!(" {cell} {}", grid.vertical));
        }
        out.push('\n');

        if row > 0 {
            out.push_str(&grid_line(grid, grid.middle));
        }
    }

    out.push_str(&grid_line(grid, grid.bottom));
    out.push_str("   ");
    for col in 0..BOARD_SIZE {
        out.push_str(&format!(" {}  ", (b'a' + col as u8) as char));
    }
    out.push('\n');
    out
}

/// One line listing the capture log, oldest first
pub fn render_captured(board: &Board, charset: Charset) -> String {
    let captured = board.captured_pieces();
    if captured.is_empty() {
        return "(none)".to_string();
    }
    captured
        .iter()
        .map(|&piece| charset.piece(piece).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
