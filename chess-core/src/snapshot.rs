//! BoardSnapshot - portable save format for a board

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ChessError;
use crate::pieces::{Color, Piece, PieceKind};
use crate::position::Position;

/// One occupied square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub position: Position,
    pub kind: PieceKind,
    pub color: Color,
}

/// Piece placement and capture log of a board
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Occupied squares, a1..h8
    pub pieces: Vec<PieceRecord>,
    /// Captured pieces in capture order
    #[serde(default)]
    pub captured: Vec<Piece>,
}

impl BoardSnapshot {
    /// Capture the current state of a board
    pub fn from_board(board: &Board) -> Self {
        let mut pieces: Vec<PieceRecord> = board
            .pieces()
            .map(|(position, piece)| PieceRecord {
                position,
                kind: piece.kind,
                color: piece.color,
            })
            .collect();
        pieces.sort_by_key(|record| record.position);

        Self {
            pieces,
            captured: board.captured_pieces().to_vec(),
        }
    }

    /// Rebuild a board, rejecting off-board or doubled squares
    pub fn into_board(self) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        for record in self.pieces {
            board.place_piece(record.position, Piece::new(record.kind, record.color))?;
        }
        for piece in self.captured {
            board.push_captured(piece);
        }
        Ok(board)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read save file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Malformed save file: {}", path.display()))
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.to_json()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write save file: {}", path.display()))?;
        Ok(())
    }
}
