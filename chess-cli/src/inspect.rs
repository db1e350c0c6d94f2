//! Show and hints commands - look at a saved board without playing
//!
//! - Level 1: run_show(), run_hints() - orchestration
//! - Level 2: load_board()
//! - Level 3: formatting (text or JSON)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use chess_core::{render_board, render_captured, Board, BoardSnapshot, Charset, Position};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ShowArgs {
    /// Saved board (JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Draw pieces with ASCII letters instead of Unicode glyphs
    #[arg(long)]
    pub ascii: bool,
}

#[derive(Args)]
pub struct HintsArgs {
    /// Saved board (JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Square holding the piece to inspect, e.g. e2
    #[arg(value_name = "SQUARE")]
    pub square: Position,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Valid targets of one piece
#[derive(Debug, Serialize)]
struct HintReport {
    square: Position,
    piece: Option<String>,
    targets: Vec<Position>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Print a saved board and its capture log
pub fn run_show(args: ShowArgs) -> Result<()> {
    let board = load_board(&args.file)?;
    let charset = if args.ascii { Charset::Ascii } else { Charset::Unicode };

    print!("{}", render_board(&board, charset));
    println!("Captured: {}", render_captured(&board, charset));
    Ok(())
}

/// Print the squares the piece on a square can reach
pub fn run_hints(args: HintsArgs) -> Result<()> {
    let board = load_board(&args.file)?;
    let report = hint_report(&board, args.square);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_report(&report));
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_board(path: &Path) -> Result<Board> {
    let board = BoardSnapshot::load(path)?
        .into_board()
        .with_context(|| format!("Invalid board in {}", path.display()))?;
    tracing::debug!("Loaded {} pieces from {}", board.piece_count(), path.display());
    Ok(board)
}

// ============================================================================
// LEVEL 3 - FORMATTING
// ============================================================================

fn hint_report(board: &Board, square: Position) -> HintReport {
    HintReport {
        square,
        piece: board.get_piece(square).map(|piece| piece.to_string()),
        targets: board.valid_targets(square),
    }
}

fn format_report(report: &HintReport) -> String {
    match &report.piece {
        None => format!("No piece on {}", report.square),
        Some(piece) if report.targets.is_empty() => {
            format!("{} on {} has no moves", piece, report.square)
        }
        Some(piece) => {
            let targets: Vec<String> = report.targets.iter().map(|p| p.to_string()).collect();
            format!("{} on {} can reach: {}", piece, report.square, targets.join(" "))
        }
    }
}
