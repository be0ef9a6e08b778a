use std::time::Duration;

use serde::Serialize;

use crate::constants::{MODE_CYCLE, POWER_DURATION, SCATTER_PERIOD};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalMode {
    Scatter,
    Chase,
}

impl GlobalMode {
    /// Scatter for the first 7s of every 27s cycle since the life began.
    pub fn at(elapsed: Duration) -> Self {
        let cycle = MODE_CYCLE.as_nanos();
        if elapsed.as_nanos() % cycle < SCATTER_PERIOD.as_nanos() {
            GlobalMode::Scatter
        } else {
            GlobalMode::Chase
        }
    }
}

/// The shared frightened interval opened by a power pellet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerWindow {
    expires_at: Option<Duration>,
}

impl PowerWindow {
    pub fn activate(&mut self, now: Duration) {
        self.expires_at = Some(now + POWER_DURATION);
    }

    pub fn is_active(&self, now: Duration) -> bool {
        matches!(self.expires_at, Some(at) if now < at)
    }

    pub fn expires_at(&self) -> Option<Duration> {
        self.expires_at
    }

    /// Clears a window whose expiry has passed; true exactly once per window.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.expires_at {
            Some(at) if now >= at => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.expires_at = None;
    }
}
