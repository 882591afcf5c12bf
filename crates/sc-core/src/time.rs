//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! invocation of the fleet update; it advances every ship by its speed in
//! kilometres.  `SimClock` maps ticks onto the wall-clock pacing of the
//! real-time runner:
//!
//!   elapsed = tick * tick_interval
//!
//! The tick counter is the canonical unit: the wall-clock interval only
//! controls how fast a viewer sees the fleet move, never how far it moves.

use std::fmt;
use std::time::Duration;

use crate::CoreError;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and its wall-clock pacing.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Wall-clock time between two ticks of the real-time runner.
    pub tick_interval: Duration,
    /// The current tick, advanced by `SimClock::advance()` each update.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Paced wall-clock time corresponding to `current_tick`.
    pub fn elapsed(&self) -> Duration {
        let ticks = u32::try_from(self.current_tick.0).unwrap_or(u32::MAX);
        self.tick_interval.saturating_mul(ticks)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Loaded from TOML by the application crate (with the `serde` feature) and
/// passed to the simulation builder.  Missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Milliseconds between ticks of the real-time runner.  Default: 50
    /// (20 ticks per second).
    pub tick_interval_ms: u64,

    /// Capacity of the outbound snapshot channel.  When it is full the tick's
    /// snapshot is dropped instead of blocking the loop.  Default: 1.
    pub snapshot_capacity: usize,

    /// Stop the real-time runner after this many ticks.  `None` runs until
    /// the process is terminated.
    pub total_ticks: Option<u64>,

    /// Master RNG seed for traffic generators.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:  50,
            snapshot_capacity: 1,
            total_ticks:       None,
            seed:              42,
        }
    }
}

impl SimConfig {
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// The tick at which a bounded run ends (exclusive), if any.
    #[inline]
    pub fn end_tick(&self) -> Option<Tick> {
        self.total_ticks.map(Tick)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_interval())
    }

    /// Reject settings the runner cannot honour.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.tick_interval_ms == 0 {
            return Err(CoreError::Config("tick_interval_ms must be > 0".into()));
        }
        if self.snapshot_capacity == 0 {
            return Err(CoreError::Config("snapshot_capacity must be > 0".into()));
        }
        Ok(())
    }
}
