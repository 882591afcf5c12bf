//! Outbound per-tick state.

use sc_core::NodeId;
use sc_fleet::{Agent, AgentStatus};
use sc_spatial::{Port, PortGraph};
use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

/// One ship as seen by a viewer.
///
/// Ports are reported by code.  `next_node` equals `current_node` for a ship
/// that no longer moves (arrived, or stranded and holding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id:           String,
    pub current_node: String,
    pub next_node:    String,
    pub lat:          f64,
    pub lon:          f64,
    pub heading:      f64,
    pub status:       AgentStatus,
}

impl AgentSnapshot {
    pub fn capture(agent: &Agent, graph: &PortGraph) -> Self {
        let current = agent.current_node();
        let next = if agent.is_under_way() {
            agent.next_node().unwrap_or(current)
        } else {
            current
        };
        let code = |node: NodeId| graph.code(node).unwrap_or_default().to_owned();

        Self {
            id:           agent.name.clone(),
            current_node: code(current),
            next_node:    code(next),
            lat:          agent.pos.lat,
            lon:          agent.pos.lon,
            heading:      agent.heading_deg,
            status:       agent.status,
        }
    }
}

/// Every ship after `tick` updates, in spawn order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick:   u64,
    pub agents: Vec<AgentSnapshot>,
}

impl Snapshot {
    pub fn capture<'a>(tick: u64, agents: impl IntoIterator<Item = &'a Agent>, graph: &PortGraph) -> Self {
        Self {
            tick,
            agents: agents.into_iter().map(|a| AgentSnapshot::capture(a, graph)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn count(&self, status: AgentStatus) -> usize {
        self.agents.iter().filter(|a| a.status == status).count()
    }

    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string(self).map_err(SimError::Encode)
    }
}

/// A port and its current availability, for status reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortStatus {
    pub id:     String,
    pub name:   String,
    pub lat:    f64,
    pub lon:    f64,
    pub active: bool,
}

impl PortStatus {
    pub fn new(port: &Port, active: bool) -> Self {
        Self {
            id:   port.code.clone(),
            name: port.name.clone(),
            lat:  port.pos.lat,
            lon:  port.pos.lon,
            active,
        }
    }
}
