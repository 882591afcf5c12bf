//! Reaction of a single ship to a port closure.

use sc_core::NodeId;
use sc_spatial::{PortGraph, Router};

use crate::{Agent, AgentStatus};

/// Result of checking one ship against a newly closed port.
#[derive(Clone, Debug, PartialEq)]
pub enum RerouteOutcome {
    /// The closed port is not ahead of the ship (or the ship no longer
    /// reroutes); nothing changed.
    Unaffected,
    /// The remainder of the route was replaced.
    Rerouted { old_remaining: Vec<NodeId>, distance_km: f64 },
    /// No route to the destination exists; the ship finishes its current
    /// lane and goes no further.
    Stranded { destination: NodeId },
}

/// Re-plan `agent` around `closed`, which the caller has already marked
/// closed in `graph`.
///
/// The search starts at the ship's `next_node`: the lane it is on is already
/// committed, even if it leads into the closed port.  On success the path up
/// to and including `current_node` is kept and the new route appended, so
/// `next_node` is unchanged.
///
/// Arrived and stranded ships are never re-planned.
pub fn reroute_around<R: Router + ?Sized>(
    agent:  &mut Agent,
    closed: NodeId,
    graph:  &PortGraph,
    router: &R,
) -> RerouteOutcome {
    if agent.status != AgentStatus::Moving || !agent.is_heading_through(closed) {
        return RerouteOutcome::Unaffected;
    }
    let Some(next) = agent.next_node() else {
        return RerouteOutcome::Unaffected;
    };
    let destination = agent.destination();

    let route = router.route(graph, next, destination);
    if !route.is_reachable() {
        agent.status = AgentStatus::Stranded;
        return RerouteOutcome::Stranded { destination };
    }

    let old_remaining = agent.remaining().to_vec();
    agent.path.truncate(agent.path_index + 1);
    agent.path.extend(route.nodes);
    RerouteOutcome::Rerouted { old_remaining, distance_km: route.distance_km }
}
