//! High-level fleet engine: spawns ships, advances them, and re-plans them
//! when ports close.

use sc_core::{AgentId, NodeId};
use sc_spatial::{PortGraph, Router};
use tracing::warn;

use crate::kinematics::{Step, advance};
use crate::reroute::{RerouteOutcome, reroute_around};
use crate::{FleetError, FleetResult, FleetStore};

/// Summary of one [`FleetEngine::advance_all`] pass.
#[derive(Debug, Default)]
pub struct AdvanceReport {
    /// Ships that moved this tick.
    pub under_way: usize,
    /// Port-reaching events (`Waypoint`, `Arrived`, `Holding`) in `AgentId`
    /// order.
    pub events: Vec<(AgentId, Step)>,
    /// Ships whose update failed; their state is unchanged for this tick.
    pub faults: Vec<(AgentId, FleetError)>,
}

/// Wraps a [`Router`] and [`FleetStore`].
///
/// The engine does not own the graph: the simulation passes it in so that
/// availability changes are visible to the next search immediately.
///
/// # Type parameter
///
/// `R` must implement [`Router`] (e.g. [`sc_spatial::DijkstraRouter`]).
pub struct FleetEngine<R: Router> {
    pub router: R,
    pub store:  FleetStore,
}

impl<R: Router> FleetEngine<R> {
    pub fn new(router: R) -> Self {
        Self { router, store: FleetStore::new() }
    }

    /// Spawn a ship travelling between two port codes.
    ///
    /// See [`spawn_between`](Self::spawn_between) for the rules.
    pub fn spawn(
        &mut self,
        name:     impl Into<String>,
        from:     &str,
        to:       &str,
        speed_km: f64,
        graph:    &PortGraph,
    ) -> FleetResult<AgentId> {
        let from_id = graph.node(from).ok_or_else(|| FleetError::UnknownPort(from.to_owned()))?;
        let to_id = graph.node(to).ok_or_else(|| FleetError::UnknownPort(to.to_owned()))?;
        self.spawn_between(name, from_id, to_id, speed_km, graph)
    }

    /// Plan a route from `from` to `to` and add a ship at rest on `from`,
    /// heading towards the first hop.
    ///
    /// # Errors
    ///
    /// - [`FleetError::InvalidSpeed`] for a non-finite or non-positive speed.
    /// - [`FleetError::SameEndpoints`] if `from == to`.
    /// - [`FleetError::NoRoute`] if the current availability leaves no path.
    /// - [`FleetError::DuplicateAgent`] if `name` is taken.
    pub fn spawn_between(
        &mut self,
        name:     impl Into<String>,
        from:     NodeId,
        to:       NodeId,
        speed_km: f64,
        graph:    &PortGraph,
    ) -> FleetResult<AgentId> {
        if !speed_km.is_finite() || speed_km <= 0.0 {
            return Err(FleetError::InvalidSpeed(speed_km));
        }
        if from == to {
            return Err(FleetError::SameEndpoints(from));
        }
        let from_pos = graph.pos(from).ok_or(FleetError::NodeOutOfRange(from))?;

        let route = self.router.route(graph, from, to);
        if route.nodes.len() < 2 {
            return Err(FleetError::NoRoute { from, to });
        }
        let first_hop = graph.pos(route.nodes[1]).ok_or(FleetError::NodeOutOfRange(route.nodes[1]))?;
        let heading = from_pos.bearing_deg(first_hop);

        self.store.insert(name.into(), route.nodes, speed_km, from_pos, heading)
    }

    /// Re-plan every moving ship whose remaining route passes through
    /// `closed`.  The caller must already have closed the port in `graph`.
    ///
    /// Returns the affected ships and what happened to each, in `AgentId`
    /// order.
    pub fn port_closed(&mut self, closed: NodeId, graph: &PortGraph) -> Vec<(AgentId, RerouteOutcome)> {
        let router = &self.router;
        self.store
            .agents
            .iter_mut()
            .filter_map(|agent| match reroute_around(agent, closed, graph, router) {
                RerouteOutcome::Unaffected => None,
                outcome => Some((agent.id, outcome)),
            })
            .collect()
    }

    /// Advance every ship by one tick.
    ///
    /// A ship whose update fails is logged and skipped; the others still move.
    pub fn advance_all(&mut self, graph: &PortGraph) -> AdvanceReport {
        let results = self.advance_each(graph);

        let mut report = AdvanceReport::default();
        for (id, result) in results {
            match result {
                Ok(Step::Idle) => {}
                Ok(Step::Sailing) => report.under_way += 1,
                Ok(step) => {
                    report.under_way += 1;
                    report.events.push((id, step));
                }
                Err(e) => {
                    warn!(agent = %id, error = %e, "ship update failed; skipped this tick");
                    report.faults.push((id, e));
                }
            }
        }
        report
    }

    #[cfg(not(feature = "parallel"))]
    fn advance_each(&mut self, graph: &PortGraph) -> Vec<(AgentId, FleetResult<Step>)> {
        self.store
            .agents
            .iter_mut()
            .map(|agent| (agent.id, advance(agent, graph)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn advance_each(&mut self, graph: &PortGraph) -> Vec<(AgentId, FleetResult<Step>)> {
        use rayon::prelude::*;

        // Indexed collect keeps AgentId order.
        self.store
            .agents
            .par_iter_mut()
            .map(|agent| (agent.id, advance(agent, graph)))
            .collect()
    }
}
