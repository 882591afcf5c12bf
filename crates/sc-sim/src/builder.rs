//! Builder for constructing a [`Sim`].

use sc_core::SimConfig;
use sc_spatial::{PortGraph, Router};

use crate::{Sim, SimResult};

/// Builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tick interval, snapshot capacity, optional run length
/// - [`PortGraph`]: from [`sc_spatial::PortGraphBuilder`] or the loaders
/// - `R: Router`: the routing algorithm (e.g. [`sc_spatial::DijkstraRouter`])
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default(), graph, DijkstraRouter).build()?;
/// sim.spawn_agent("Ship-1", "NYC", "SIN", 80.0);
/// let frame = sim.update();
/// ```
pub struct SimBuilder<R: Router> {
    config: SimConfig,
    graph:  PortGraph,
    router: R,
}

impl<R: Router> SimBuilder<R> {
    pub fn new(config: SimConfig, graph: PortGraph, router: R) -> Self {
        Self { config, graph, router }
    }

    /// Validate the configuration and return a [`Sim`] at tick 0 with no
    /// ships.
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate()?;

        Ok(Sim::new(self.config, self.graph, self.router))
    }
}
