use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick {
    pub frame: u64,
}

/// Fixed server tick length.
pub const TICK_MS: u64 = 600;

impl Tick {
    pub fn new() -> Self {
        Tick { frame: 0 }
    }

    pub fn next(&self) -> Self {
        Tick { frame: self.frame + 1 }
    }

    /// Ticks elapsed since `earlier`. Saturates at zero if `earlier` is in the future.
    pub fn since(&self, earlier: Tick) -> u64 {
        self.frame.saturating_sub(earlier.frame)
    }
}

/// Converts a real-time interval to whole game ticks, truncating.
pub fn seconds_to_ticks(secs: u64) -> u64 {
    secs * 1000 / TICK_MS
}
