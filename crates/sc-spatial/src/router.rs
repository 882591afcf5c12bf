//! Routing trait and default Dijkstra implementation.
//!
//! # Availability filter
//!
//! Closed ports are filtered at relaxation time: a lane `u → v` is skipped
//! when `v` is closed.  The source side of a lane is never checked, so a
//! search may start from a closed port, and a port closed after it was
//! settled can still be left.  Ships use this to sail out of a port that
//! closed while they were approaching it.
//!
//! # Contract
//!
//! [`Router::route`] never fails.  An unreachable destination is reported as
//! [`Route::unreachable`] (an empty node list with infinite distance), and
//! `route(x, x)` is `[x]` at distance 0.  Callers that prefer an error use
//! [`Router::try_route`].

use sc_core::NodeId;

use crate::heap::MinHeap;
use crate::network::PortGraph;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the ports to visit, start and end
/// included, and the total great-circle distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub distance_km: f64,
}

impl Route {
    /// The "no path" result: no nodes, infinite distance.
    pub fn unreachable() -> Self {
        Self { nodes: Vec::new(), distance_km: f64::INFINITY }
    }

    /// The trivial route that stays at `node`.
    pub fn stay(node: NodeId) -> Self {
        Self { nodes: vec![node], distance_km: 0.0 }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance_km.is_finite() && !self.nodes.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so the engine can move onto the
/// runner thread.
pub trait Router: Send + Sync {
    /// Shortest route from `from` to `to` over currently open ports.
    fn route(&self, graph: &PortGraph, from: NodeId, to: NodeId) -> Route;

    /// [`route`](Self::route) with the unreachable case as an error.
    fn try_route(&self, graph: &PortGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        let route = self.route(graph, from, to);
        if route.is_reachable() {
            Ok(route)
        } else {
            Err(SpatialError::NoRoute { from, to })
        }
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Single-source Dijkstra over lane lengths, stopping as soon as the
/// destination is settled.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &PortGraph, from: NodeId, to: NodeId) -> Route {
        dijkstra(graph, from, to)
    }
}

fn dijkstra(graph: &PortGraph, from: NodeId, to: NodeId) -> Route {
    if !graph.contains(from) || !graph.contains(to) {
        return Route::unreachable();
    }
    if from == to {
        return Route::stay(from);
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];
    dist[from.index()] = 0.0;

    // Every port enters the queue once with its initial distance; improved
    // distances are pushed again and the stale copies skipped on pop.
    let mut heap = MinHeap::with_capacity(n);
    for (i, &d) in dist.iter().enumerate() {
        heap.push(d, NodeId(i as u32));
    }

    while let Some((cost, node)) = heap.pop() {
        if node == to {
            break;
        }
        if cost > dist[node.index()] {
            continue;
        }

        for (neighbor, length_km) in graph.lanes(node) {
            if !graph.is_active(neighbor) {
                continue;
            }
            let alt = cost + length_km;
            if alt < dist[neighbor.index()] {
                dist[neighbor.index()] = alt;
                prev[neighbor.index()] = node;
                heap.push(alt, neighbor);
            }
        }
    }

    let total = dist[to.index()];
    if total.is_infinite() {
        return Route::unreachable();
    }
    Route { nodes: reconstruct(&prev, from, to), distance_km: total }
}

/// Walk predecessors back from `to`.  Only called when `to` was reached, so
/// the chain always terminates at `from`.
fn reconstruct(prev: &[NodeId], from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        debug_assert_ne!(cur, NodeId::INVALID, "broken predecessor chain");
        nodes.push(cur);
    }
    nodes.reverse();
    nodes
}
