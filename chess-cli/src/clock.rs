//! Turn clock - per-move time limit owned by the play session
//!
//! The clock never touches the game. When time runs out it hands the
//! active player's color to a forfeit callback and the session decides
//! what that means.

use std::time::{Duration, Instant};

use chess_core::Color;

#[derive(Clone, Debug)]
pub struct TurnClock {
    limit: Option<Duration>,
    started: Instant,
    expired: bool,
}

impl TurnClock {
    /// `None` disables the clock
    pub fn new(limit: Option<Duration>, now: Instant) -> Self {
        Self {
            limit,
            started: now,
            expired: false,
        }
    }

    /// Start a fresh turn
    pub fn reset(&mut self, now: Instant) {
        self.started = now;
        self.expired = false;
    }

    /// Time left in the current turn, `None` when unlimited
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.limit
            .map(|limit| limit.saturating_sub(now.saturating_duration_since(self.started)))
    }

    /// Call `on_forfeit(active)` if the turn ran out. Fires once per turn.
    ///
    /// Returns whether the turn has expired.
    pub fn check<F>(&mut self, now: Instant, active: Color, on_forfeit: F) -> bool
    where
        F: FnOnce(Color),
    {
        if self.expired {
            return true;
        }
        if self.remaining(now) == Some(Duration::ZERO) {
            self.expired = true;
            on_forfeit(active);
        }
        self.expired
    }
}
