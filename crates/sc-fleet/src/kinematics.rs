//! Per-tick movement of one ship along its current lane.
//!
//! Each tick:
//!
//! 1. `D` = haversine distance `current_node → next_node`, recomputed every
//!    tick rather than cached.
//! 2. Heading = initial bearing `current_node → next_node`.
//! 3. `progress += speed / D`; left unchanged when `D == 0` (coincident
//!    ports).
//! 4. Position = lat/lon lerp between the two ports by `progress`.
//! 5. If `progress >= 1`: reset to 0, step `path_index`, and either arrive
//!    (snapping onto the destination) or take the next lane.
//!
//! A stranded ship runs the same steps on its committed lane, then holds at
//! the port that ends it instead of continuing.

use sc_core::NodeId;
use sc_spatial::PortGraph;

use crate::{Agent, AgentStatus, FleetError, FleetResult};

/// What happened to a ship during one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// Arrived earlier or holding; nothing changed.
    Idle,
    /// Still on the same lane.
    Sailing,
    /// Reached an intermediate port and turned onto the next lane.
    Waypoint(NodeId),
    /// Reached the final port.
    Arrived(NodeId),
    /// Stranded ship finished its committed lane and now holds at this port.
    Holding(NodeId),
}

/// Advance `agent` by one tick over `graph`.
///
/// Returns an error, leaving the ship untouched, if its path references a
/// port the graph does not contain.
pub fn advance(agent: &mut Agent, graph: &PortGraph) -> FleetResult<Step> {
    if !agent.is_under_way() {
        return Ok(Step::Idle);
    }

    let from = agent.current_node();
    let to = agent.next_node().ok_or(FleetError::PathExhausted(agent.id))?;
    let from_pos = graph.pos(from).ok_or(FleetError::NodeOutOfRange(from))?;
    let to_pos = graph.pos(to).ok_or(FleetError::NodeOutOfRange(to))?;

    let lane_km = from_pos.distance_km(to_pos);
    agent.heading_deg = from_pos.bearing_deg(to_pos);

    if lane_km > 0.0 {
        agent.progress += agent.speed_km / lane_km;
    }
    agent.pos = from_pos.lerp(to_pos, agent.progress);

    if agent.progress < 1.0 {
        return Ok(Step::Sailing);
    }

    agent.progress = 0.0;
    agent.path_index += 1;

    if agent.status == AgentStatus::Stranded {
        agent.holding = true;
        agent.pos = to_pos;
        return Ok(Step::Holding(to));
    }
    if agent.path_index >= agent.path.len() - 1 {
        agent.status = AgentStatus::Arrived;
        agent.pos = to_pos;
        return Ok(Step::Arrived(to));
    }
    Ok(Step::Waypoint(to))
}
