//! Simulation observer trait for progress reporting and data collection.

use sc_core::Tick;
use sc_fleet::{Agent, RerouteOutcome};

use crate::Snapshot;

/// Callbacks invoked by [`Sim`][crate::Sim] around each update and each
/// applied command.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: closure log
///
/// ```rust,ignore
/// struct ClosureLog(Vec<String>);
///
/// impl SimObserver for ClosureLog {
///     fn on_port_toggled(&mut self, tick: Tick, port: &str, active: bool) {
///         if !active {
///             self.0.push(format!("{tick}: {port} closed"));
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each update, before any ship moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every ship has moved.  `under_way` counts the ships that
    /// moved this tick.
    fn on_tick_end(&mut self, _tick: Tick, _under_way: usize) {}

    /// Called after a port's availability flips.
    fn on_port_toggled(&mut self, _tick: Tick, _port: &str, _active: bool) {}

    /// Called once for each ship affected by a port closure, after its path
    /// (or status) has been updated.
    fn on_reroute(&mut self, _tick: Tick, _agent: &Agent, _outcome: &RerouteOutcome) {}

    /// Called with the snapshot produced by each update.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once when a bounded run finishes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
