//! Per-ship journey state.

use sc_core::{AgentId, GeoPoint, NodeId};

/// Where a ship is in its lifecycle.
///
/// ```text
/// Moving ──(last lane completed)──────────────▶ Arrived   (terminal)
/// Moving ──(port closed, no way round)────────▶ Stranded  (terminal)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AgentStatus {
    #[default]
    Moving,
    Arrived,
    Stranded,
}

impl AgentStatus {
    /// Wire label, e.g. for snapshot serialisation.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Moving   => "MOVING",
            AgentStatus::Arrived  => "ARRIVED",
            AgentStatus::Stranded => "STRANDED",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ship and its journey.
///
/// # Invariants
///
/// - `path[0]` is the spawn port and `path[len - 1]` the destination;
///   `path.len() >= 2`.
/// - `path_index < path.len()`; it never decreases.
/// - While the ship is under way, `path_index < path.len() - 1`, so
///   `current_node() = path[path_index]` and `next_node() = path[path_index + 1]`
///   both exist.
/// - `progress` is the fraction of the current lane covered and is reset to 0
///   exactly when `path_index` advances.
/// - Once `status` is [`AgentStatus::Arrived`] nothing mutates again.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub id: AgentId,

    /// External name from the spawn request, e.g. `"Ship-7"`.
    pub name: String,

    /// Port sequence from spawn port to destination.  Only the part after
    /// `path_index` is ever replaced (on reroute).
    pub path: Vec<NodeId>,

    /// Index into `path` of the last port fully reached.
    pub path_index: usize,

    /// Fraction of the lane `current_node → next_node` covered so far.
    pub progress: f64,

    /// Kilometres covered per tick.
    pub speed_km: f64,

    /// Interpolated position for display.
    pub pos: GeoPoint,

    /// Forward bearing towards `next_node`, degrees in `[0, 360)`.
    pub heading_deg: f64,

    pub status: AgentStatus,

    /// Set once a stranded ship has finished the lane it was committed to;
    /// it stays at that port for the rest of the run.
    pub holding: bool,
}

impl Agent {
    /// A ship at rest on `path[0]`, pointed at `path[1]`.
    pub fn new(
        id:       AgentId,
        name:     String,
        path:     Vec<NodeId>,
        speed_km: f64,
        pos:      GeoPoint,
        heading_deg: f64,
    ) -> Self {
        debug_assert!(path.len() >= 2, "a journey needs at least one lane");
        Self {
            id,
            name,
            path,
            path_index: 0,
            progress: 0.0,
            speed_km,
            pos,
            heading_deg,
            status: AgentStatus::Moving,
            holding: false,
        }
    }

    #[inline]
    pub fn current_node(&self) -> NodeId {
        self.path[self.path_index]
    }

    /// The port the ship is sailing towards; `None` once no lane remains.
    #[inline]
    pub fn next_node(&self) -> Option<NodeId> {
        self.path.get(self.path_index + 1).copied()
    }

    #[inline]
    pub fn destination(&self) -> NodeId {
        self.path[self.path.len() - 1]
    }

    /// Ports still ahead of the ship (everything after `path_index`).
    #[inline]
    pub fn remaining(&self) -> &[NodeId] {
        &self.path[self.path_index + 1..]
    }

    /// `true` if `node` is still ahead on the planned route.
    pub fn is_heading_through(&self, node: NodeId) -> bool {
        self.remaining().contains(&node)
    }

    #[inline]
    pub fn is_arrived(&self) -> bool {
        self.status == AgentStatus::Arrived
    }

    /// `true` while the ship still moves on ticks (not arrived, not holding).
    #[inline]
    pub fn is_under_way(&self) -> bool {
        !self.is_arrived() && !self.holding
    }
}
