//! Port graph representation and builder.
//!
//! # Data layout
//!
//! Lanes are stored in **Compressed Sparse Row (CSR)** format.  Given a
//! `NodeId n`, its outgoing lanes occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Both lane arrays (`edge_to`, `edge_length_km`) are sorted by source port.
//! A port's outgoing lanes keep the order in which they were added.
//!
//! # Mutability
//!
//! Topology and coordinates are fixed once [`PortGraphBuilder::build`]
//! returns; every field is private.  The only runtime mutation is the
//! per-port availability flag, flipped through [`PortGraph::set_active`] /
//! [`PortGraph::toggle`] by whoever owns the graph mutably (the simulation
//! engine, which hands out `&PortGraph` only).

use std::collections::HashMap;

use tracing::debug;

use sc_core::{GeoPoint, NodeId};

// ── Port ──────────────────────────────────────────────────────────────────────

/// Static record for one port.  Coordinates never change after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Port {
    /// Unique external key, e.g. `"SIN"`.
    pub code: String,
    /// Display name, e.g. `"Singapore"`.
    pub name: String,
    pub pos: GeoPoint,
}

// ── PortGraph ─────────────────────────────────────────────────────────────────

/// Undirected port graph in CSR format plus live availability flags.
///
/// Do not construct directly; use [`PortGraphBuilder`].
pub struct PortGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Port records, indexed by `NodeId`.
    ports: Vec<Port>,

    /// `active[n]` is `false` while port `n` is closed.
    active: Vec<bool>,

    /// `code → NodeId` lookup.
    index: HashMap<String, NodeId>,

    // ── CSR lane adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    node_out_start: Vec<u32>,

    // ── Lane data, sorted by source port ──────────────────────────────────
    edge_to: Vec<NodeId>,
    /// Great-circle length of each lane in kilometres.  Dijkstra's edge cost.
    edge_length_km: Vec<f64>,
}

impl PortGraph {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.ports.len()
    }

    /// Number of directed lanes (twice the number of `add_lane` calls).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Resolve a port code to its `NodeId`.
    pub fn node(&self, code: &str) -> Option<NodeId> {
        self.index.get(code).copied()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.ports.len()
    }

    pub fn port(&self, node: NodeId) -> Option<&Port> {
        self.ports.get(node.index())
    }

    #[inline]
    pub fn pos(&self, node: NodeId) -> Option<GeoPoint> {
        self.ports.get(node.index()).map(|p| p.pos)
    }

    pub fn code(&self, node: NodeId) -> Option<&str> {
        self.ports.get(node.index()).map(|p| p.code.as_str())
    }

    /// Iterate `(NodeId, &Port)` in id order.
    pub fn iter_ports(&self) -> impl Iterator<Item = (NodeId, &Port)> + '_ {
        self.ports
            .iter()
            .enumerate()
            .map(|(i, p)| (NodeId(i as u32), p))
    }

    // ── Availability ──────────────────────────────────────────────────────

    /// `true` if `node` exists and is open.
    #[inline]
    pub fn is_active(&self, node: NodeId) -> bool {
        self.active.get(node.index()).copied().unwrap_or(false)
    }

    /// Set the availability flag.  Returns `false` if `node` does not exist.
    pub fn set_active(&mut self, node: NodeId, active: bool) -> bool {
        match self.active.get_mut(node.index()) {
            Some(flag) => {
                *flag = active;
                true
            }
            None => false,
        }
    }

    /// Flip the availability flag, returning the new state, or `None` if
    /// `node` does not exist.
    pub fn toggle(&mut self, node: NodeId) -> Option<bool> {
        let flag = self.active.get_mut(node.index())?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Number of ports currently open.
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// `(neighbour, length_km)` for every lane leaving `node`, in insertion
    /// order.  Empty for an unknown node.
    #[inline]
    pub fn lanes(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let (start, end) = self.out_range(node);
        self.edge_to[start..end]
            .iter()
            .copied()
            .zip(self.edge_length_km[start..end].iter().copied())
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let (start, end) = self.out_range(node);
        end - start
    }

    /// Length of the lane `from → to` in kilometres, if one exists.
    pub fn lane_km(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.lanes(from).find(|&(next, _)| next == to).map(|(_, km)| km)
    }

    fn out_range(&self, node: NodeId) -> (usize, usize) {
        if !self.contains(node) {
            return (0, 0);
        }
        (
            self.node_out_start[node.index()] as usize,
            self.node_out_start[node.index() + 1] as usize,
        )
    }
}

// ── PortGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`PortGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sc_core::GeoPoint;
/// use sc_spatial::PortGraphBuilder;
///
/// let mut b = PortGraphBuilder::new();
/// b.add_port("ROT", "Rotterdam", GeoPoint::new(51.95, 4.14));
/// b.add_port("LON", "London", GeoPoint::new(51.51, -0.13));
/// assert!(b.add_lane("ROT", "LON"));
/// assert!(!b.add_lane("ROT", "XXX")); // unknown endpoint: nothing added
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 2); // bidirectional
/// ```
pub struct PortGraphBuilder {
    ports:     Vec<Port>,
    index:     HashMap<String, NodeId>,
    raw_lanes: Vec<RawLane>,
}

struct RawLane {
    from:      NodeId,
    to:        NodeId,
    length_km: f64,
}

impl PortGraphBuilder {
    pub fn new() -> Self {
        Self {
            ports:     Vec::new(),
            index:     HashMap::new(),
            raw_lanes: Vec::new(),
        }
    }

    pub fn with_capacity(ports: usize, lanes: usize) -> Self {
        Self {
            ports:     Vec::with_capacity(ports),
            index:     HashMap::with_capacity(ports),
            raw_lanes: Vec::with_capacity(lanes * 2),
        }
    }

    /// Add a port (open by default) and return its `NodeId`.
    ///
    /// Re-adding an existing code overwrites the record in place and keeps
    /// the same `NodeId`.  Lanes already added keep the length computed from
    /// the coordinates at the time they were added.
    pub fn add_port(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        pos:  GeoPoint,
    ) -> NodeId {
        let port = Port { code: code.into(), name: name.into(), pos };
        if let Some(&id) = self.index.get(&port.code) {
            self.ports[id.index()] = port;
            return id;
        }
        let id = NodeId(self.ports.len() as u32);
        self.index.insert(port.code.clone(), id);
        self.ports.push(port);
        id
    }

    /// Add a bidirectional lane between two known ports, weighted by their
    /// haversine distance.
    ///
    /// Returns `false` and adds nothing if either code is unknown.
    pub fn add_lane(&mut self, from: &str, to: &str) -> bool {
        match (self.node(from), self.node(to)) {
            (Some(a), Some(b)) => self.add_lane_between(a, b),
            _ => false,
        }
    }

    /// Like [`add_lane`](Self::add_lane) but by `NodeId`.
    pub fn add_lane_between(&mut self, a: NodeId, b: NodeId) -> bool {
        let (Some(pa), Some(pb)) = (self.ports.get(a.index()), self.ports.get(b.index())) else {
            return false;
        };
        let length_km = pa.pos.distance_km(pb.pos);
        self.raw_lanes.push(RawLane { from: a, to: b, length_km });
        self.raw_lanes.push(RawLane { from: b, to: a, length_km });
        true
    }

    pub fn node(&self, code: &str) -> Option<NodeId> {
        self.index.get(code).copied()
    }

    pub fn node_count(&self) -> usize { self.ports.len() }
    pub fn edge_count(&self) -> usize { self.raw_lanes.len() }

    /// Consume the builder and produce a [`PortGraph`] with every port open.
    pub fn build(self) -> PortGraph {
        let node_count = self.ports.len();
        let edge_count = self.raw_lanes.len();

        // Stable sort: each port's lanes stay in insertion order.
        let mut raw = self.raw_lanes;
        raw.sort_by_key(|e| e.from.0);

        let edge_to:        Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_km: Vec<f64>    = raw.iter().map(|e| e.length_km).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        debug!(ports = node_count, lanes = edge_count, "port graph built");

        PortGraph {
            active: vec![true; node_count],
            ports: self.ports,
            index: self.index,
            node_out_start,
            edge_to,
            edge_length_km,
        }
    }
}

impl Default for PortGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
