//! chaos: a random fleet sails the port world while you close ports.
//!
//! Snapshots are written to stdout as one JSON object per line; logs go to
//! stderr.  Type a port code (`SIN`) or a JSON command on stdin to toggle
//! ports or spawn extra ships while it runs:
//!
//! ```bash
//! chaos --ships 50 | your-viewer
//! echo SIN | chaos --ticks 400 > frames.jsonl
//! RUST_LOG=sc_sim=debug chaos --config data/chaos.toml
//! ```

mod traffic;
mod world;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sc_core::{SimConfig, SimRng};
use sc_fleet::AgentStatus;
use sc_sim::{Runner, RunnerHandles, SimBuilder};
use sc_spatial::DijkstraRouter;

use traffic::{FleetPlan, forward_commands, release_fleet};

/// Supply-chain chaos demo
///
/// Ships travel the shortest open route between random ports.  Closing a
/// port re-plans every ship that still had it ahead.
#[derive(Parser, Debug)]
#[command(name = "chaos")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file with runner settings (tick_interval_ms, snapshot_capacity,
    /// total_ticks, seed).  Flags below override it.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Port table (.json or .csv).  Defaults to the built-in seven-port world.
    #[arg(long)]
    ports: Option<PathBuf>,

    /// Lane table (.csv with from,to).  Requires --ports.
    #[arg(long, requires = "ports")]
    lanes: Option<PathBuf>,

    /// Number of ships to release
    #[arg(short = 'n', long, default_value = "50")]
    ships: usize,

    /// Slowest ship, km per tick
    #[arg(long, default_value = "50")]
    min_speed: f64,

    /// Fastest ship, km per tick
    #[arg(long, default_value = "150")]
    max_speed: f64,

    /// Ships are released at random over this many milliseconds
    #[arg(long, default_value = "5000")]
    stagger_ms: u64,

    /// Milliseconds between ticks
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Stop after this many ticks (runs until killed otherwise)
    #[arg(short = 't', long)]
    ticks: Option<u64>,

    /// Seed for the random fleet
    #[arg(long)]
    seed: Option<u64>,

    /// Print only every Nth received snapshot
    #[arg(long, default_value = "1")]
    every: u64,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(ms) = args.interval_ms {
        config.tick_interval_ms = ms;
    }
    if args.ticks.is_some() {
        config.total_ticks = args.ticks;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// `true` for the frames printed when only every `every`th one is wanted.
fn keep_frame(index: usize, every: u64) -> bool {
    (index as u64).is_multiple_of(every.max(1))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,chaos=info,sc_sim=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    // 1. World.
    let graph = match &args.ports {
        Some(ports) => world::load_world(ports, args.lanes.as_deref())?,
        None => world::default_world(),
    };
    let codes: Vec<String> = graph.iter_ports().map(|(_, p)| p.code.clone()).collect();

    // 2. Engine.
    let mut rng = SimRng::new(config.seed);
    let sim = SimBuilder::new(config.clone(), graph, DijkstraRouter).build()?;
    for port in sim.port_statuses() {
        info!(id = %port.id, name = %port.name, lat = port.lat, lon = port.lon, "port");
    }
    info!(
        ships = args.ships,
        interval_ms = config.tick_interval_ms,
        ticks = ?config.total_ticks,
        seed = config.seed,
        "starting"
    );

    let RunnerHandles { commands, snapshots, join } = Runner::start(sim)?;

    // 3. Producers: the staggered fleet and the console.
    let plan = FleetPlan {
        ships:       args.ships,
        min_speed:   args.min_speed,
        max_speed:   args.max_speed,
        max_stagger: Duration::from_millis(args.stagger_ms),
    };
    release_fleet(plan.draw(&codes, &mut rng.child(1)), commands.clone())?;

    let console = commands.clone();
    thread::Builder::new()
        .name("console".into())
        .spawn(move || forward_commands(io::stdin().lock(), &console))?;
    drop(commands);

    // 4. Viewer: one JSON line per snapshot.
    let every = args.every.max(1);
    let mut out = BufWriter::new(io::stdout().lock());
    for (i, frame) in snapshots.iter().enumerate() {
        if !keep_frame(i, every) {
            continue;
        }
        let line = frame.to_json()?;
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                info!("stdout closed; exiting");
                return Ok(());
            }
            return Err(e.into());
        }
    }
    drop(snapshots);

    // Only a bounded run gets here.
    let report = join.join().map_err(|_| anyhow::anyhow!("runner thread panicked"))?;
    let stats = report.stats;
    if stats.frames_dropped > 0 {
        warn!(dropped = stats.frames_dropped, "viewer fell behind; frames were skipped");
    }
    let final_frame = report.sim.snapshot();
    info!(
        ticks = stats.ticks,
        commands = stats.commands,
        moving = final_frame.count(AgentStatus::Moving),
        arrived = final_frame.count(AgentStatus::Arrived),
        stranded = final_frame.count(AgentStatus::Stranded),
        "done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::keep_frame;

    #[test]
    fn every_nth_frame_is_kept() {
        let kept: Vec<usize> = (0..10).filter(|&i| keep_frame(i, 3)).collect();
        assert_eq!(kept, vec![0, 3, 6, 9]);
        assert!((0..5).all(|i| keep_frame(i, 1)));
        assert!((0..5).all(|i| keep_frame(i, 0)));
    }
}
