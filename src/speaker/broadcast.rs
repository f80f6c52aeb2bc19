//! Position broadcast policy
//!
//! Observers learn a speaker's position lazily: a new position is only
//! worth sending once at least [`BROADCAST_INTERVAL_TICKS`] have elapsed
//! since the last broadcast and the speaker has moved at least
//! [`BROADCAST_DISTANCE`] from the last broadcast position. A skipped
//! update is simply superseded by the next qualifying one; there is no
//! retry or gap-filling.

use glam::DVec3;

/// Minimum ticks between position broadcasts.
pub const BROADCAST_INTERVAL_TICKS: u64 = 20;
/// Minimum displacement before a new position is broadcast.
pub const BROADCAST_DISTANCE: f64 = 0.1;

/// Threshold- and interval-gated position broadcast baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionBroadcaster {
    last_position: Option<DVec3>,
    last_broadcast_tick: u64,
}

impl PositionBroadcaster {
    /// Create a broadcaster that has never broadcast
    pub fn new() -> Self {
        PositionBroadcaster::default()
    }

    /// True once the broadcast interval has elapsed on `clock`.
    ///
    /// Checked before the current position is even read, so an idle
    /// speaker costs nothing per tick.
    pub fn due(&self, clock: u64) -> bool {
        clock - self.last_broadcast_tick >= BROADCAST_INTERVAL_TICKS
    }

    /// Advance the baseline to `position` if it is far enough from the
    /// last broadcast position, returning the position to broadcast.
    ///
    /// Below-threshold movement returns `None` and leaves both the
    /// baseline position and the broadcast tick untouched, so the next
    /// check compares against the same baseline. The first ever broadcast
    /// has no baseline and always qualifies.
    pub fn try_advance(&mut self, clock: u64, position: DVec3) -> Option<DVec3> {
        match self.last_position {
            Some(last) if last.distance(position) < BROADCAST_DISTANCE => None,
            _ => {
                self.last_position = Some(position);
                self.last_broadcast_tick = clock;
                Some(position)
            }
        }
    }

    /// Position of the most recent broadcast, if any
    pub fn last_position(&self) -> Option<DVec3> {
        self.last_position
    }

    /// Tick of the most recent broadcast
    pub fn last_broadcast_tick(&self) -> u64 {
        self.last_broadcast_tick
    }
}
