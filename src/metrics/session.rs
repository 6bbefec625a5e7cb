use std::time::{Duration, Instant};

/// Time spent in the current round. Stops when the round ends so the
/// game-over screen shows how long the lost game lasted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundClock {
    Running { since: Instant },
    Stopped { lasted: Duration },
}

impl RoundClock {
    pub fn elapsed(&self, now: Instant) -> Duration {
        match *self {
            RoundClock::Running { since } => now.saturating_duration_since(since),
            RoundClock::Stopped { lasted } => lasted,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RoundClock::Running { .. })
    }
}

/// Scores and timing for one sitting at the keyboard. Held in memory only.
#[derive(Debug, Clone)]
pub struct SessionStats {
    clock: RoundClock,
    /// Rounds that ended in a collision
    pub games_played: u32,
    /// Rounds started from the game-over screen
    pub restarts: u32,
    pub high_score: u32,
    /// Score of the most recently lost round
    pub last_score: u32,
}

impl SessionStats {
    /// Begin the session with the first round already running
    pub fn new(now: Instant) -> Self {
        Self {
            clock: RoundClock::Running { since: now },
            games_played: 0,
            restarts: 0,
            high_score: 0,
            last_score: 0,
        }
    }

    pub fn clock(&self) -> RoundClock {
        self.clock
    }

    pub fn round_time(&self, now: Instant) -> Duration {
        self.clock.elapsed(now)
    }

    /// A round ended; freeze the clock and fold in the score
    pub fn end_round(&mut self, final_score: u32, now: Instant) {
        if !self.clock.is_running() {
            return;
        }
        self.clock = RoundClock::Stopped {
            lasted: self.clock.elapsed(now),
        };
        self.games_played += 1;
        self.last_score = final_score;
        self.high_score = self.high_score.max(final_score);
    }

    /// The player left the game-over screen
    pub fn restart_round(&mut self, now: Instant) {
        if self.clock.is_running() {
            return;
        }
        self.clock = RoundClock::Running { since: now };
        self.restarts += 1;
    }
}

/// `mm:ss`, minutes keep counting past an hour
pub fn format_round_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
