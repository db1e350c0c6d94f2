//! Chess Core - Rule engine for two-player chess
//!
//! This crate provides the game logic consumed by presentation shells:
//! - Board coordinates ("a1".."h8") and straight-line geometry
//! - Piece kinds and their movement rules
//! - Board state, path clearance, move validation and execution
//! - Turn management and king-capture win detection
//! - Portable JSON snapshots of a board
//! - Text rendering of a board

pub mod position;
pub mod pieces;
pub mod board;
pub mod game;
pub mod snapshot;
pub mod render;
pub mod error;

// Re-exports for convenient access
pub use position::{Position, BOARD_SIZE};
pub use pieces::{Color, Piece, PieceKind, KindInfo, PIECE_KINDS, kind_info};
pub use board::Board;
pub use game::Game;
pub use snapshot::{BoardSnapshot, PieceRecord};
pub use render::{render_board, render_captured, Charset};
pub use error::ChessError;
