use serde::Serialize;

/// Phase of a landing page's handoff to the app.
///
/// Phases only move forward within a page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandoffState {
    /// Incoming data is not usable; the page shows a waiting message.
    Pending,
    /// Incoming data is usable; the page waits for the user to continue.
    Ready,
    /// Automatic handoff is scheduled.
    Redirecting,
    /// The automatic redirect has been attempted.
    HandedOff,
    /// The handoff is presumed to have failed; the manual action is offered.
    Fallback,
}

/// Cosmetic seconds-remaining counter shown while redirecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Countdown(u32);

impl Countdown {
    pub const DEFAULT_START: u32 = 3;

    pub fn new(start: u32) -> Self {
        Self(start)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Decrements by one, holding at zero.
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_finished(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START)
    }
}

/// What the presentation layer reads from a running handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandoffSnapshot {
    pub state: HandoffState,
    pub countdown: Countdown,
}
