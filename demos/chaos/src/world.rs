//! The port graph the demo sails on.
//!
//! Built in: seven major container ports and eleven lanes between them.
//! `--ports`/`--lanes` replace it with tables on disk (see `data/`).

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use sc_core::GeoPoint;
use sc_spatial::loader::{load_lanes_csv, load_ports_csv, load_ports_json};
use sc_spatial::{PortGraph, PortGraphBuilder};

const PORTS: [(&str, &str, f64, f64); 7] = [
    ("NYC", "New York",    40.7128,  -74.0060),
    ("LON", "London",      51.5074,   -0.1278),
    ("ROT", "Rotterdam",   51.9490,    4.1453),
    ("SIN", "Singapore",    1.2644,  103.8222),
    ("SHA", "Shanghai",    31.2304,  121.4737),
    ("TOK", "Tokyo",       35.6762,  139.6503),
    ("LAX", "Los Angeles", 33.7405, -118.2720),
];

const LANES: [(&str, &str); 11] = [
    ("NYC", "LON"),
    ("NYC", "ROT"),
    ("LON", "ROT"),
    ("LON", "SIN"),
    ("ROT", "SIN"),
    ("SIN", "SHA"),
    ("SIN", "TOK"),
    ("SHA", "TOK"),
    ("SHA", "LAX"),
    ("TOK", "LAX"),
    ("LAX", "NYC"),
];

/// The built-in seven-port world.
pub fn default_world() -> PortGraph {
    let mut b = PortGraphBuilder::with_capacity(PORTS.len(), LANES.len());
    for (code, name, lat, lon) in PORTS {
        b.add_port(code, name, GeoPoint::new(lat, lon));
    }
    for (from, to) in LANES {
        b.add_lane(from, to);
    }
    b.build()
}

/// Load ports (`.json` or `.csv`) and, if given, a lane CSV.
pub fn load_world(ports: &Path, lanes: Option<&Path>) -> Result<PortGraph> {
    let mut b = PortGraphBuilder::new();

    let is_json = ports.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let count = if is_json {
        load_ports_json(ports, &mut b)
    } else {
        load_ports_csv(ports, &mut b)
    }
    .with_context(|| format!("loading ports from {}", ports.display()))?;
    if count == 0 {
        bail!("{} contains no ports", ports.display());
    }

    match lanes {
        Some(path) => {
            let summary = load_lanes_csv(path, &mut b)
                .with_context(|| format!("loading lanes from {}", path.display()))?;
            if summary.skipped > 0 {
                warn!(skipped = summary.skipped, "lanes naming unknown ports were skipped");
            }
        }
        None => {
            // Reuse the built-in lanes between whichever ports were loaded.
            for (from, to) in LANES {
                b.add_lane(from, to);
            }
        }
    }

    let graph = b.build();
    info!(ports = graph.node_count(), lanes = graph.edge_count() / 2, "world loaded");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn data(file: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
    }

    #[test]
    fn built_in_world_shape() {
        let g = default_world();
        assert_eq!(g.node_count(), 7);
        assert_eq!(g.edge_count(), 22);
        assert_eq!(g.active_count(), 7);
        let sin = g.node("SIN").unwrap();
        assert_eq!(g.out_degree(sin), 4);
    }

    #[test]
    fn shipped_tables_match_built_in_world() {
        let loaded = load_world(&data("ports.json"), Some(&data("lanes.csv"))).unwrap();
        let built = default_world();
        let ports = |g: &PortGraph| g.iter_ports().map(|(_, p)| p.clone()).collect::<Vec<_>>();
        assert_eq!(ports(&loaded), ports(&built));
        for (node, _) in built.iter_ports() {
            assert!(loaded.lanes(node).eq(built.lanes(node)), "lanes differ at {node}");
        }
    }

    #[test]
    fn missing_port_table_is_an_error() {
        assert!(load_world(&data("nope.csv"), None).is_err());
    }
}
