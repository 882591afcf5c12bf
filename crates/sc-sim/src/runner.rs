//! Real-time runner: one dedicated thread drives a [`Sim`] at a fixed
//! interval.
//!
//! ```text
//!  producers ──Command──▶ unbounded ──try_recv──▶ ┌──────────┐
//!                                                 │ sim-tick │ ──try_send──▶ bounded(cap) ──▶ viewer
//!  crossbeam::channel::tick(interval) ──────────▶ └──────────┘
//! ```
//!
//! The tick thread is the only writer of the graph and the fleet.  Commands
//! queued since the previous tick are all applied before the next update.
//! Snapshots are offered without blocking: if the viewer has not taken the
//! previous frame yet, the new one is dropped.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender, TryRecvError, TrySendError};
use sc_core::Tick;
use sc_spatial::Router;
use tracing::{debug, info, trace};

use crate::{Command, NoopObserver, Sim, SimError, SimObserver, SimResult, Snapshot};

/// Sending half of the inbound command queue.  Cheap to clone; one per
/// producer.
pub type CommandSender = Sender<Command>;

/// Counters for one runner session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks:          u64,
    pub commands:       u64,
    pub frames_sent:    u64,
    pub frames_dropped: u64,
}

/// What the runner thread hands back when it stops.
pub struct RunReport<R: Router> {
    pub sim:   Sim<R>,
    pub stats: RunStats,
}

/// Handles to a running simulation.
pub struct RunnerHandles<R: Router> {
    pub commands:  CommandSender,
    pub snapshots: Receiver<Snapshot>,
    pub join:      JoinHandle<RunReport<R>>,
}

impl<R: Router> RunnerHandles<R> {
    /// Wait for the tick thread to stop.
    ///
    /// Drops this handle's command sender and snapshot receiver first, so an
    /// open-ended run ends once every other clone is gone too.
    pub fn wait(self) -> SimResult<RunReport<R>> {
        let RunnerHandles { commands, snapshots, join } = self;
        drop(commands);
        drop(snapshots);
        join.join().map_err(|_| SimError::RunnerPanicked)
    }
}

pub struct Runner;

impl Runner {
    /// Start `sim` on its own thread with no observer.
    pub fn start<R: Router + 'static>(sim: Sim<R>) -> SimResult<RunnerHandles<R>> {
        Self::start_with(sim, NoopObserver)
    }

    /// Start `sim` on its own thread.
    ///
    /// The thread stops when `config.total_ticks` updates have run, or, for an
    /// open-ended run, once every command sender and the snapshot receiver
    /// have been dropped.
    pub fn start_with<R, O>(sim: Sim<R>, observer: O) -> SimResult<RunnerHandles<R>>
    where
        R: Router + 'static,
        O: SimObserver + Send + 'static,
    {
        let (command_tx, command_rx) = channel::unbounded();
        let (snapshot_tx, snapshot_rx) = channel::bounded(sim.config.snapshot_capacity);

        let join = thread::Builder::new()
            .name("sim-tick".into())
            .spawn(move || run_loop(sim, command_rx, snapshot_tx, observer))?;

        Ok(RunnerHandles { commands: command_tx, snapshots: snapshot_rx, join })
    }
}

fn run_loop<R: Router, O: SimObserver>(
    mut sim:      Sim<R>,
    commands:     Receiver<Command>,
    snapshots:    Sender<Snapshot>,
    mut observer: O,
) -> RunReport<R> {
    let interval = sim.config.tick_interval();
    let end: Option<Tick> = sim.config.end_tick();
    let ticker = channel::tick(interval);
    let mut stats = RunStats::default();
    let mut inbound_open = true;
    let mut outbound_open = true;

    info!(?interval, ?end, "runner started");

    loop {
        if end.is_some_and(|end| sim.clock.current_tick >= end) {
            break;
        }
        if !inbound_open && !outbound_open {
            debug!("no producers or viewers left; stopping");
            break;
        }
        if ticker.recv().is_err() {
            break;
        }

        // ── Tick boundary: apply everything queued since the last update ──
        while inbound_open {
            match commands.try_recv() {
                Ok(command) => {
                    stats.commands += 1;
                    sim.apply_with(command, &mut observer);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => inbound_open = false,
            }
        }

        let snapshot = sim.update_with(&mut observer);
        stats.ticks += 1;

        if outbound_open {
            match snapshots.try_send(snapshot) {
                Ok(()) => stats.frames_sent += 1,
                Err(TrySendError::Full(frame)) => {
                    stats.frames_dropped += 1;
                    trace!(tick = frame.tick, "viewer busy; frame dropped");
                }
                Err(TrySendError::Disconnected(_)) => outbound_open = false,
            }
        }
    }

    observer.on_sim_end(sim.clock.current_tick);
    info!(
        ticks = stats.ticks,
        sim_time = ?sim.clock.elapsed(),
        commands = stats.commands,
        sent = stats.frames_sent,
        dropped = stats.frames_dropped,
        "runner stopped"
    );
    RunReport { sim, stats }
}
