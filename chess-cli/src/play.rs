//! Play command - interactive two-player game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_session(), Session::run(), report_outcome()
//! - Level 3: Session::handle() and one step per command
//! - Level 4: prompt and message formatting

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use chess_core::{
    render_board, render_captured, BoardSnapshot, Charset, Color, Game, Position,
};

use crate::clock::TurnClock;
use crate::command::{Command, HELP};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Start from a saved board instead of the standard layout
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// File used by 'save' and 'load' when no file is given
    #[arg(long, value_name = "FILE", default_value = "chess-save.json")]
    pub save: PathBuf,

    /// Seconds allowed per move (0 = no limit)
    #[arg(long, default_value = "20")]
    pub move_time: u64,

    /// Draw pieces with ASCII letters instead of Unicode glyphs
    #[arg(long)]
    pub ascii: bool,
}

/// Settings for one play session
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub save_path: PathBuf,
    pub move_time: Option<Duration>,
    pub charset: Charset,
}

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Winner(Color),
    Timeout { loser: Color },
    Quit,
    EndOfInput,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the session (optionally from a save file)
/// 2. Read commands from stdin until the game ends
/// 3. Report the outcome
pub fn run(args: PlayArgs) -> Result<()> {
    let config = configure_session(&args);
    let game = initial_game(args.load.as_deref())?;

    tracing::info!(
        "Starting game (move time: {:?}, save file: {})",
        config.move_time,
        config.save_path.display()
    );

    let mut session = Session::new(game, config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let end = session.run(stdin.lock(), &mut stdout)?;

    report_outcome(end, &session);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn configure_session(args: &PlayArgs) -> SessionConfig {
    SessionConfig {
        save_path: args.save.clone(),
        move_time: (args.move_time > 0).then(|| Duration::from_secs(args.move_time)),
        charset: if args.ascii { Charset::Ascii } else { Charset::Unicode },
    }
}

fn initial_game(load: Option<&Path>) -> Result<Game> {
    match load {
        Some(path) => {
            let board = BoardSnapshot::load(path)?
                .into_board()
                .with_context(|| format!("Invalid board in {}", path.display()))?;
            tracing::info!("Loaded board from {}", path.display());
            Ok(Game::with_board(board, Color::White))
        }
        None => Ok(Game::new()),
    }
}

fn report_outcome(end: SessionEnd, session: &Session) {
    tracing::info!(
        "{} moves played, {} pieces captured",
        session.move_log().len(),
        session.game().board().captured_pieces().len()
    );
    match end {
        SessionEnd::Winner(color) => tracing::info!("Game over, {} wins", color),
        SessionEnd::Timeout { loser } => tracing::warn!("Game over, {} ran out of time", loser),
        SessionEnd::Quit | SessionEnd::EndOfInput => tracing::info!("Game abandoned"),
    }
}

// ============================================================================
// LEVEL 3 - SESSION
// ============================================================================

/// A game plus everything the terminal front end keeps around it
pub struct Session {
    game: Game,
    config: SessionConfig,
    clock: TurnClock,
    move_log: Vec<String>,
}

impl Session {
    pub fn new(game: Game, config: SessionConfig) -> Self {
        let clock = TurnClock::new(config.move_time, Instant::now());
        Self {
            game,
            config,
            clock,
            move_log: Vec::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn move_log(&self) -> &[String] {
        &self.move_log
    }

    /// Read commands until the game is decided or input runs out
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<SessionEnd> {
        writeln!(out, "{}", self.board_text())?;
        if let Some(end) = self.decided(out)? {
            return Ok(end);
        }
        self.prompt(out)?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;

            let mut forfeited = None;
            self.clock
                .check(Instant::now(), self.game.active_player(), |loser| forfeited = Some(loser));
            if let Some(loser) = forfeited {
                tracing::warn!("{} exceeded the move time", loser);
                writeln!(
                    out,
                    "Game over, {} has exhausted the allotted time. {} wins!",
                    loser,
                    loser.opponent()
                )?;
                return Ok(SessionEnd::Timeout { loser });
            }

            if line.trim().is_empty() {
                self.prompt(out)?;
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    self.prompt(out)?;
                    continue;
                }
            };

            if let Some(end) = self.handle(command, out)? {
                return Ok(end);
            }
            self.prompt(out)?;
        }

        Ok(SessionEnd::EndOfInput)
    }

    fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Option<SessionEnd>> {
        match command {
            Command::Move { from, to } => return self.play_move(from, to, out),
            Command::Hint(square) => self.show_hint(square, out)?,
            Command::Board => writeln!(out, "{}", self.board_text())?,
            Command::Captured => writeln!(
                out,
                "Captured: {}",
                render_captured(self.game.board(), self.config.charset)
            )?,
            Command::Log => self.show_log(out)?,
            Command::Save(path) => self.save(path, out)?,
            Command::Load(path) => return self.load(path, out),
            Command::New => self.new_game(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Some(SessionEnd::Quit)),
        }
        Ok(None)
    }

    fn play_move<W: Write>(&mut self, from: Position, to: Position, out: &mut W) -> Result<Option<SessionEnd>> {
        if let Err(e) = self.game.attempt_move(from, to) {
            tracing::warn!("Rejected move {} -> {}: {}", from, to, e);
            writeln!(out, "{e}")?;
            return Ok(None);
        }

        if let Some(piece) = self.game.board().get_piece(to) {
            let entry = format!("{} : {} -> {}", self.config.charset.piece(piece), from, to);
            tracing::debug!("Played {}", entry);
            self.move_log.push(entry);
        }
        self.clock.reset(Instant::now());

        writeln!(out, "{}", self.board_text())?;
        self.decided(out)
    }

    /// End the session if a king is already gone
    fn decided<W: Write>(&self, out: &mut W) -> Result<Option<SessionEnd>> {
        match self.game.winner() {
            Some(winner) => {
                writeln!(out, "Game over! The {winner} player won.")?;
                Ok(Some(SessionEnd::Winner(winner)))
            }
            None => Ok(None),
        }
    }

    fn show_hint<W: Write>(&self, square: Position, out: &mut W) -> Result<()> {
        let targets = self.game.board().valid_targets(square);
        if targets.is_empty() {
            writeln!(out, "No moves from {square}")?;
        } else {
            writeln!(out, "{square} can reach: {}", join_positions(&targets))?;
        }
        Ok(())
    }

    fn show_log<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.move_log.is_empty() {
            writeln!(out, "No moves played yet")?;
        }
        for (i, entry) in self.move_log.iter().enumerate() {
            writeln!(out, "{:>3}. {}", i + 1, entry)?;
        }
        Ok(())
    }

    fn save<W: Write>(&self, path: Option<PathBuf>, out: &mut W) -> Result<()> {
        let path = path.unwrap_or_else(|| self.config.save_path.clone());
        match BoardSnapshot::from_board(self.game.board()).save(&path) {
            Ok(()) => {
                tracing::info!("Saved board to {}", path.display());
                writeln!(out, "Saved to {}", path.display())?;
            }
            Err(e) => {
                tracing::warn!("Save failed: {:#}", e);
                writeln!(out, "Could not save: {e:#}")?;
            }
        }
        Ok(())
    }

    /// Replace the board; whose turn it is does not change
    fn load<W: Write>(&mut self, path: Option<PathBuf>, out: &mut W) -> Result<Option<SessionEnd>> {
        let path = path.unwrap_or_else(|| self.config.save_path.clone());
        let loaded = BoardSnapshot::load(&path)
            .and_then(|snapshot| Ok(snapshot.into_board()?));

        match loaded {
            Ok(board) => {
                *self.game.board_mut() = board;
                self.clock.reset(Instant::now());
                tracing::info!("Loaded board from {}", path.display());
                writeln!(out, "Loaded {}", path.display())?;
                writeln!(out, "{}", self.board_text())?;
                self.decided(out)
            }
            Err(e) => {
                tracing::warn!("Load failed: {:#}", e);
                writeln!(out, "Could not load: {e:#}")?;
                Ok(None)
            }
        }
    }

    fn new_game<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.game.reset();
        self.move_log.clear();
        self.clock.reset(Instant::now());
        tracing::info!("New game");
        writeln!(out, "{}", self.board_text())?;
        Ok(())
    }

    // ========================================================================
    // LEVEL 4 - FORMATTING
    // ========================================================================

    fn board_text(&self) -> String {
        render_board(self.game.board(), self.config.charset)
    }

    fn prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        let active = self.game.active_player();
        match self.clock.remaining(Instant::now()) {
            Some(left) => write!(out, "It is {active}'s turn ({}s left) > ", left.as_secs())?,
            None => write!(out, "It is {active}'s turn > ")?,
        }
        out.flush()?;
        Ok(())
    }
}

fn join_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TESTS
// ============================================================================
