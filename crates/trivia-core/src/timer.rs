//! Per-question countdown.
//!
//! `Countdown` holds no clock of its own. The quiz driver calls [`Countdown::tick`]
//! once per real second, which keeps the timer and user input on the same task.

use serde::{Deserialize, Serialize};

/// Default time allowed per question.
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown is not running; nothing happened.
    Idle,
    /// One second elapsed and time is left.
    Remaining(u32),
    /// The countdown just reached zero and stopped itself.
    Expired,
}

/// A stoppable countdown measured in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_seconds: u32,
    running: bool,
}

impl Countdown {
    /// A stopped countdown showing `seconds`.
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining_seconds: seconds,
            running: false,
        }
    }

    /// Begin counting down from `duration_seconds`.
    ///
    /// A zero duration starts already expired: the next tick reports `Expired`.
    pub fn start(&mut self, duration_seconds: u32) {
        self.remaining_seconds = duration_seconds;
        self.running = true;
    }

    /// Cancel the countdown. Safe to call any number of times.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop any running countdown and start a fresh one.
    pub fn reset(&mut self, duration_seconds: u32) {
        self.stop();
        self.start(duration_seconds);
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining_seconds)
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDS_PER_QUESTION)
    }
}

/// Format seconds as zero-padded `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
