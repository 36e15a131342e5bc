//! Fetch cooldown state machine.
//!
//! Enforces the minimum wait between user-triggered fetches. Started
//! unconditionally after every fetch dispatch; there is no cancellation
//! path, only expiry (or process restart).

/// Seconds between permitted fetches.
pub const COOLDOWN_SECS: u32 = 600;

/// Cooldown state for gating the fetch trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CooldownState {
    #[default]
    Ready,
    CoolingDown {
        remaining: u32,
    },
}

impl CooldownState {
    /// True if a new fetch can be dispatched.
    pub fn can_fetch(self) -> bool {
        matches!(self, CooldownState::Ready)
    }

    /// State after a fetch dispatch. Always restarts the full cooldown.
    pub fn start(self) -> Self {
        CooldownState::CoolingDown {
            remaining: COOLDOWN_SECS,
        }
    }

    /// State after one one-second tick.
    pub fn tick(self) -> Self {
        match self {
            CooldownState::Ready => CooldownState::Ready,
            CooldownState::CoolingDown { remaining } if remaining <= 1 => CooldownState::Ready,
            CooldownState::CoolingDown { remaining } => CooldownState::CoolingDown {
                remaining: remaining - 1,
            },
        }
    }

    /// Seconds until the fetch trigger re-enables.
    pub fn remaining(self) -> u32 {
        match self {
            CooldownState::Ready => 0,
            CooldownState::CoolingDown { remaining } => remaining,
        }
    }

    /// Countdown text shown while cooling down, `None` once ready.
    pub fn countdown_label(self) -> Option<String> {
        match self {
            CooldownState::Ready => None,
            CooldownState::CoolingDown { remaining } => {
                let mins = remaining / 60;
                let secs = remaining % 60;
                Some(format!("Refresh available in {mins:02}:{secs:02}"))
            }
        }
    }
}
