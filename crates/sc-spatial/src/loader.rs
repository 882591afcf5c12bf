//! Port and lane table loaders.
//!
//! # Port tables
//!
//! CSV, one row per port:
//!
//! ```csv
//! id,name,lat,lon
//! SIN,Singapore,1.2644,103.8222
//! ROT,Rotterdam,51.9490,4.1453
//! ```
//!
//! or a JSON array of the same records:
//!
//! ```json
//! [{ "id": "SIN", "name": "Singapore", "lat": 1.2644, "lon": 103.8222 }]
//! ```
//!
//! `code` is accepted as an alias for `id`.  Any `active` field in the input
//! is ignored: every loaded port starts open.
//!
//! # Lane tables
//!
//! CSV, one row per bidirectional lane:
//!
//! ```csv
//! from,to
//! SIN,ROT
//! ```
//!
//! Rows naming an unknown port are skipped, not rejected; the count of
//! skipped rows is returned so the caller can report it.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use sc_core::GeoPoint;

use crate::network::PortGraphBuilder;
use crate::{SpatialError, SpatialResult};

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PortRecord {
    #[serde(alias = "code")]
    id:   String,
    name: String,
    lat:  f64,
    lon:  f64,
}

#[derive(Deserialize)]
struct LaneRecord {
    from: String,
    to:   String,
}

/// Outcome of loading a lane table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneLoadSummary {
    pub added:   usize,
    pub skipped: usize,
}

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Load ports from a CSV file into `builder`.  Returns the number of rows read.
pub fn load_ports_csv(path: &Path, builder: &mut PortGraphBuilder) -> SpatialResult<usize> {
    let file = std::fs::File::open(path)?;
    load_ports_reader(file, builder)
}

/// Like [`load_ports_csv`] but accepts any `Read` source.
pub fn load_ports_reader<R: Read>(reader: R, builder: &mut PortGraphBuilder) -> SpatialResult<usize> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut count = 0;
    for result in csv_reader.deserialize::<PortRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        insert_port(builder, row)?;
        count += 1;
    }
    debug!(count, "loaded port table");
    Ok(count)
}

/// Load ports from a JSON array file into `builder`.
pub fn load_ports_json(path: &Path, builder: &mut PortGraphBuilder) -> SpatialResult<usize> {
    let file = std::fs::File::open(path)?;
    load_ports_json_reader(std::io::BufReader::new(file), builder)
}

/// Like [`load_ports_json`] but accepts any `Read` source.
pub fn load_ports_json_reader<R: Read>(
    reader: R,
    builder: &mut PortGraphBuilder,
) -> SpatialResult<usize> {
    let rows: Vec<PortRecord> =
        serde_json::from_reader(reader).map_err(|e| SpatialError::Parse(e.to_string()))?;
    let count = rows.len();
    for row in rows {
        insert_port(builder, row)?;
    }
    debug!(count, "loaded port table (json)");
    Ok(count)
}

fn insert_port(builder: &mut PortGraphBuilder, row: PortRecord) -> SpatialResult<()> {
    if !(-90.0..=90.0).contains(&row.lat) || !(-180.0..=180.0).contains(&row.lon) {
        return Err(SpatialError::Parse(format!(
            "port {:?} has out-of-range coordinates ({}, {})",
            row.id, row.lat, row.lon
        )));
    }
    builder.add_port(row.id, row.name, GeoPoint::new(row.lat, row.lon));
    Ok(())
}

// ── Lanes ─────────────────────────────────────────────────────────────────────

/// Load lanes from a CSV file.  Ports must already be in `builder`.
pub fn load_lanes_csv(path: &Path, builder: &mut PortGraphBuilder) -> SpatialResult<LaneLoadSummary> {
    let file = std::fs::File::open(path)?;
    load_lanes_reader(file, builder)
}

/// Like [`load_lanes_csv`] but accepts any `Read` source.
pub fn load_lanes_reader<R: Read>(
    reader: R,
    builder: &mut PortGraphBuilder,
) -> SpatialResult<LaneLoadSummary> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut summary = LaneLoadSummary::default();
    for result in csv_reader.deserialize::<LaneRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        if builder.add_lane(&row.from, &row.to) {
            summary.added += 1;
        } else {
            debug!(from = %row.from, to = %row.to, "skipping lane with unknown port");
            summary.skipped += 1;
        }
    }
    Ok(summary)
}
