//! The `Sim` struct and its tick loop.

use sc_core::{AgentId, SimClock, SimConfig, Tick};
use sc_fleet::{Agent, FleetEngine, RerouteOutcome, Step};
use sc_spatial::{PortGraph, Router};
use tracing::{debug, info, warn};

use crate::{Command, NoopObserver, PortStatus, SimError, SimObserver, SimResult, Snapshot};

/// The simulation engine.
///
/// `Sim<R>` is the single owner of the port graph and the fleet.  Everything
/// that mutates either goes through `&mut self`, so a caller that wants
/// concurrent input (see [`Runner`][crate::Runner]) queues it and applies it
/// between updates.
///
/// Each [`update`](Self::update):
///
/// 1. Advances every ship by one tick (ships are independent; a failing ship
///    is logged and skipped).
/// 2. Advances the clock.
/// 3. Captures a [`Snapshot`] of every ship.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router> {
    pub config: SimConfig,

    /// Counts completed updates.
    pub(crate) clock: SimClock,

    /// Port graph with live availability.  Only [`toggle_port`](Self::toggle_port)
    /// flips a flag, so every closure reaches the reroute.
    graph: PortGraph,

    /// Ships plus the router used to plan and re-plan them.
    fleet: FleetEngine<R>,
}

impl<R: Router> Sim<R> {
    pub(crate) fn new(config: SimConfig, graph: PortGraph, router: R) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            graph,
            fleet: FleetEngine::new(router),
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Spawn a ship; invalid requests are dropped and logged at debug level.
    pub fn spawn_agent(&mut self, name: &str, from: &str, to: &str, speed_km: f64) -> Option<AgentId> {
        match self.try_spawn_agent(name, from, to, speed_km) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(agent = name, from, to, speed_km, error = %e, "spawn dropped");
                None
            }
        }
    }

    /// [`spawn_agent`](Self::spawn_agent), reporting why a spawn was refused.
    pub fn try_spawn_agent(&mut self, name: &str, from: &str, to: &str, speed_km: f64) -> SimResult<AgentId> {
        let id = self.fleet.spawn(name, from, to, speed_km, &self.graph)?;
        debug!(agent = name, %id, from, to, speed_km, "ship spawned");
        Ok(id)
    }

    /// Flip port `code` and return its new state, or `None` for an unknown
    /// code.
    ///
    /// Closing a port re-plans every moving ship that still has it ahead;
    /// opening one re-plans nobody.
    pub fn toggle_port(&mut self, code: &str) -> Option<bool> {
        self.toggle_port_with(code, &mut NoopObserver)
    }

    pub fn toggle_port_with<O: SimObserver>(&mut self, code: &str, observer: &mut O) -> Option<bool> {
        let Some(node) = self.graph.node(code) else {
            debug!(port = code, "toggle ignored: unknown port");
            return None;
        };
        let active = self.graph.toggle(node)?;
        let now = self.clock.current_tick;
        info!(port = code, active, tick = %now, "port toggled");
        observer.on_port_toggled(now, code, active);

        if !active {
            for (id, outcome) in self.fleet.port_closed(node, &self.graph) {
                let Some(agent) = self.fleet.store.get(id) else { continue };
                match &outcome {
                    RerouteOutcome::Rerouted { distance_km, .. } => {
                        debug!(agent = %agent.name, port = code, distance_km, "ship rerouted");
                    }
                    RerouteOutcome::Stranded { .. } => {
                        warn!(agent = %agent.name, port = code, "ship stranded: no route to destination");
                    }
                    RerouteOutcome::Unaffected => {}
                }
                observer.on_reroute(now, agent, &outcome);
            }
        }
        Some(active)
    }

    /// Apply one inbound request.
    pub fn apply(&mut self, command: Command) {
        self.apply_with(command, &mut NoopObserver);
    }

    pub fn apply_with<O: SimObserver>(&mut self, command: Command, observer: &mut O) {
        match command {
            Command::TogglePort { id } => {
                self.toggle_port_with(&id, observer);
            }
            Command::Spawn { id, from, to, speed } => {
                self.spawn_agent(&id, &from, &to, speed);
            }
        }
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance every ship by one tick and return the resulting snapshot.
    pub fn update(&mut self) -> Snapshot {
        self.update_with(&mut NoopObserver)
    }

    pub fn update_with<O: SimObserver>(&mut self, observer: &mut O) -> Snapshot {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let report = self.fleet.advance_all(&self.graph);
        for (id, step) in &report.events {
            match step {
                Step::Arrived(port) => {
                    debug!(agent = %id, port = %port, tick = %now, "ship arrived");
                }
                Step::Holding(port) => {
                    debug!(agent = %id, port = %port, tick = %now, "stranded ship holding");
                }
                _ => {}
            }
        }
        observer.on_tick_end(now, report.under_way);

        self.clock.advance();
        let snapshot = self.snapshot();
        observer.on_snapshot(&snapshot);
        snapshot
    }

    /// Run exactly `n` updates from the current position, discarding the
    /// snapshots except through `observer`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.update_with(observer);
        }
    }

    /// Run until `config.total_ticks`, then call `on_sim_end`.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the configuration has no `total_ticks`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self
            .config
            .end_tick()
            .ok_or_else(|| SimError::Config("run() needs total_ticks; use Runner for open-ended runs".into()))?;
        while self.clock.current_tick < end {
            self.update_with(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    // ── Read-only views ───────────────────────────────────────────────────

    /// Updates completed so far.
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    /// Every ship as of the last completed update.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.clock.current_tick.0, self.fleet.store.iter(), &self.graph)
    }

    /// Every port with its current availability, in id order.
    pub fn port_statuses(&self) -> Vec<PortStatus> {
        self.graph
            .iter_ports()
            .map(|(node, port)| PortStatus::new(port, self.graph.is_active(node)))
            .collect()
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.fleet.store.find(name)
    }

    /// Read-only view of the port graph.  Availability only changes through
    /// [`toggle_port`](Self::toggle_port):
    ///
    /// ```compile_fail
    /// # use sc_core::{GeoPoint, SimConfig};
    /// # use sc_sim::SimBuilder;
    /// # use sc_spatial::{DijkstraRouter, PortGraphBuilder};
    /// # let mut b = PortGraphBuilder::new();
    /// # let a = b.add_port("A", "Alpha", GeoPoint::new(0.0, 0.0));
    /// let mut sim = SimBuilder::new(SimConfig::default(), b.build(), DijkstraRouter).build().unwrap();
    /// sim.graph().set_active(a, false);
    /// ```
    pub fn graph(&self) -> &PortGraph {
        &self.graph
    }

    pub fn fleet(&self) -> &FleetEngine<R> {
        &self.fleet
    }
}
