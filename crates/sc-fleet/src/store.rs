//! The `FleetStore`: every ship ever spawned, in spawn order.

use std::collections::HashMap;

use sc_core::{AgentId, GeoPoint, NodeId};

use crate::{Agent, AgentStatus, FleetError, FleetResult};

/// Holds all ships, indexed by `AgentId`, plus a name lookup.
///
/// Ships are never removed: arrived and stranded ships stay in the store in
/// their terminal state, so `AgentId(i)` is always `agents[i]`.
#[derive(Default)]
pub struct FleetStore {
    /// Ships in spawn order, indexed by `AgentId`.
    pub agents: Vec<Agent>,

    by_name: HashMap<String, AgentId>,
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new ship at rest on `path[0]`.
    ///
    /// # Errors
    ///
    /// [`FleetError::DuplicateAgent`] if `name` is already taken.
    pub fn insert(
        &mut self,
        name:        String,
        path:        Vec<NodeId>,
        speed_km:    f64,
        pos:         GeoPoint,
        heading_deg: f64,
    ) -> FleetResult<AgentId> {
        if self.by_name.contains_key(&name) {
            return Err(FleetError::DuplicateAgent(name));
        }
        let id = AgentId(self.agents.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.agents.push(Agent::new(id, name, path, speed_km, pos, heading_deg));
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    pub fn find(&self, name: &str) -> Option<&Agent> {
        self.by_name.get(name).and_then(|&id| self.get(id))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of ships currently in `status`.
    pub fn count(&self, status: AgentStatus) -> usize {
        self.agents.iter().filter(|a| a.status == status).count()
    }
}
