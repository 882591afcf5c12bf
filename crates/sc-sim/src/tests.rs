//! Integration tests for sc-sim.

use sc_core::{GeoPoint, SimConfig, Tick};
use sc_fleet::{Agent, AgentStatus, RerouteOutcome};
use sc_spatial::{DijkstraRouter, PortGraph, PortGraphBuilder};

use crate::{Sim, SimBuilder, SimObserver, Snapshot};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: Option<u64>) -> SimConfig {
    SimConfig {
        tick_interval_ms:  1,
        snapshot_capacity: 1,
        total_ticks,
        seed:              42,
    }
}

/// Equator line A-B-C-D (one degree apart) with a southern bypass B-S-D
/// around C.
fn bypass_graph() -> PortGraph {
    let mut b = PortGraphBuilder::new();
    b.add_port("A", "Alpha", GeoPoint::new(0.0, 0.0));
    b.add_port("B", "Bravo", GeoPoint::new(0.0, 1.0));
    b.add_port("C", "Charlie", GeoPoint::new(0.0, 2.0));
    b.add_port("D", "Delta", GeoPoint::new(0.0, 3.0));
    b.add_port("S", "South", GeoPoint::new(-1.0, 2.0));
    for (from, to) in [("A", "B"), ("B", "C"), ("C", "D"), ("B", "S"), ("S", "D")] {
        b.add_lane(from, to);
    }
    b.build()
}

fn sim(total_ticks: Option<u64>) -> Sim<DijkstraRouter> {
    SimBuilder::new(test_config(total_ticks), bypass_graph(), DijkstraRouter)
        .build()
        .unwrap()
}

fn codes(sim: &Sim<DijkstraRouter>, name: &str) -> Vec<String> {
    sim.agent(name)
        .unwrap()
        .path
        .iter()
        .map(|&n| sim.graph().code(n).unwrap().to_owned())
        .collect()
}

/// Records every callback.
#[derive(Default)]
struct Recorder {
    tick_starts: Vec<Tick>,
    tick_ends:   Vec<(Tick, usize)>,
    toggles:     Vec<(String, bool)>,
    reroutes:    Vec<(String, RerouteOutcome)>,
    frames:      Vec<u64>,
    ended_at:    Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.tick_starts.push(tick);
    }
    fn on_tick_end(&mut self, tick: Tick, under_way: usize) {
        self.tick_ends.push((tick, under_way));
    }
    fn on_port_toggled(&mut self, _tick: Tick, port: &str, active: bool) {
        self.toggles.push((port.to_owned(), active));
    }
    fn on_reroute(&mut self, _tick: Tick, agent: &Agent, outcome: &RerouteOutcome) {
        self.reroutes.push((agent.name.clone(), outcome.clone()));
    }
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.frames.push(snapshot.tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(SimConfig::default(), bypass_graph(), DijkstraRouter)
            .build()
            .unwrap();
        assert_eq!(sim.now(), Tick(0));
        assert!(sim.fleet().store.is_empty());
        assert_eq!(sim.graph().node_count(), 5);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = SimConfig { tick_interval_ms: 0, ..SimConfig::default() };
        let result = SimBuilder::new(config, bypass_graph(), DijkstraRouter).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn zero_snapshot_capacity_is_rejected() {
        let config = SimConfig { snapshot_capacity: 0, ..SimConfig::default() };
        assert!(SimBuilder::new(config, bypass_graph(), DijkstraRouter).build().is_err());
    }
}

// ── Command protocol ──────────────────────────────────────────────────────────

#[cfg(test)]
mod command_tests {
    use crate::{Command, SimError};

    #[test]
    fn tagged_toggle() {
        let cmd = Command::parse_json(r#"{"type":"toggle_port","id":"SIN"}"#).unwrap();
        assert_eq!(cmd, Command::toggle("SIN"));
    }

    #[test]
    fn tagged_spawn() {
        let cmd = Command::parse_json(
            r#"{"type":"spawn","id":"Ship-7","from":"NYC","to":"TOK","speed":80.5}"#,
        )
        .unwrap();
        assert_eq!(cmd, Command::spawn("Ship-7", "NYC", "TOK", 80.5));
    }

    #[test]
    fn bare_id_is_a_toggle() {
        let cmd = Command::parse_json(r#"{"id":"ROT"}"#).unwrap();
        assert_eq!(cmd, Command::toggle("ROT"));
    }

    #[test]
    fn malformed_messages_are_errors() {
        assert!(Command::parse_json("not json").is_err());
        assert!(Command::parse_json(r#"{"type":"sink","id":"ROT"}"#).is_err());
        assert!(Command::parse_json(r#"{"id":"ROT","from":"NYC"}"#).is_err());
        assert!(Command::parse_json(r#"{"type":"spawn","id":"x"}"#).is_err());
    }

    #[test]
    fn wire_form_carries_type_tag() {
        let json = Command::toggle("LAX").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "toggle_port");
        assert_eq!(value["id"], "LAX");
    }

    #[test]
    fn encode_and_parse_failures_read_differently() {
        let parse = Command::parse_json("{").unwrap_err();
        assert!(matches!(parse, SimError::Command(_)));
        assert!(parse.to_string().starts_with("malformed command"), "{parse}");

        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let encode = SimError::Encode(cause);
        assert!(encode.to_string().starts_with("JSON encoding failed"), "{encode}");
    }
}

// ── Spawning and toggling ─────────────────────────────────────────────────────

#[cfg(test)]
mod command_application {
    use super::*;
    use crate::Command;

    #[test]
    fn invalid_spawns_are_dropped_silently() {
        let mut sim = sim(None);
        assert!(sim.spawn_agent("Ship-1", "A", "ZZZ", 50.0).is_none());
        assert!(sim.spawn_agent("Ship-1", "A", "A", 50.0).is_none());
        assert!(sim.spawn_agent("Ship-1", "A", "D", -1.0).is_none());
        assert!(sim.spawn_agent("Ship-1", "A", "D", 50.0).is_some());
        assert!(sim.spawn_agent("Ship-1", "B", "D", 50.0).is_none());
        assert_eq!(sim.fleet().store.len(), 1);
        assert!(sim.try_spawn_agent("Ship-2", "A", "A", 50.0).is_err());
    }

    #[test]
    fn toggle_flips_and_reports_state() {
        let mut sim = sim(None);
        assert_eq!(sim.toggle_port("C"), Some(false));
        assert!(!sim.graph().is_active(sim.graph().node("C").unwrap()));
        assert_eq!(sim.toggle_port("C"), Some(true));
        assert_eq!(sim.toggle_port("nowhere"), None);
    }

    #[test]
    fn closing_through_the_engine_always_reroutes() {
        let mut sim = sim(None);
        sim.spawn_agent("Ship-1", "A", "D", 50.0).unwrap();
        let c = sim.graph().node("C").unwrap();
        let c_pos = sim.graph().pos(c);

        assert_eq!(sim.toggle_port("C"), Some(false));
        assert!(!sim.graph().is_active(c));
        assert_eq!(codes(&sim, "Ship-1"), ["A", "B", "S", "D"]);
        assert_eq!(sim.agent("Ship-1").unwrap().status, AgentStatus::Moving);

        sim.toggle_port("C");
        assert_eq!(sim.graph().pos(c), c_pos);
    }

    #[test]
    fn port_statuses_reflect_availability() {
        let mut sim = sim(None);
        sim.apply(Command::toggle("B"));
        let statuses = sim.port_statuses();
        assert_eq!(statuses.len(), 5);
        assert_eq!(statuses[0].id, "A");
        assert_eq!(statuses[0].name, "Alpha");
        assert!(statuses[0].active);
        assert!(!statuses[1].active);
        assert_eq!(statuses.iter().filter(|p| p.active).count(), 4);
    }

    #[test]
    fn apply_spawn_command() {
        let mut sim = sim(None);
        sim.apply(Command::spawn("Ship-1", "A", "D", 50.0));
        assert_eq!(codes(&sim, "Ship-1"), ["A", "B", "C", "D"]);
    }
}

// ── Reroute through the engine ────────────────────────────────────────────────

#[cfg(test)]
mod reroute_tests {
    use super::*;

    #[test]
    fn closure_reroutes_and_reopening_does_not_revert() {
        let mut sim = sim(None);
        sim.spawn_agent("Ship-1", "A", "D", 50.0).unwrap();
        sim.update();

        sim.toggle_port("C");
        assert_eq!(codes(&sim, "Ship-1"), ["A", "B", "S", "D"]);
        let frame = sim.snapshot();
        let ship = frame.get("Ship-1").unwrap();
        assert_eq!(ship.current_node, "A");
        assert_eq!(ship.next_node, "B");
        assert_eq!(ship.status, AgentStatus::Moving);

        sim.toggle_port("C");
        assert_eq!(codes(&sim, "Ship-1"), ["A", "B", "S", "D"]);

        for _ in 0..20 {
            sim.update();
        }
        let frame = sim.snapshot();
        let ship = frame.get("Ship-1").unwrap();
        assert_eq!(ship.status, AgentStatus::Arrived);
        assert_eq!((ship.lat, ship.lon), (0.0, 3.0));
        assert_eq!(ship.current_node, "D");
        assert_eq!(ship.next_node, "D");
    }

    #[test]
    fn unrelated_ships_are_untouched() {
        let mut sim = sim(None);
        sim.spawn_agent("Near", "A", "B", 50.0).unwrap();
        sim.spawn_agent("Far", "S", "D", 50.0).unwrap();
        let before: Vec<_> = sim.fleet().store.iter().cloned().collect();

        sim.toggle_port("C");
        let after: Vec<_> = sim.fleet().store.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn stranded_ship_finishes_lane_and_holds() {
        let mut sim = sim(None);
        let mut rec = Recorder::default();
        sim.spawn_agent("Ship-1", "A", "D", 50.0).unwrap();
        sim.update();

        sim.toggle_port_with("D", &mut rec);
        assert_eq!(rec.toggles, vec![("D".to_owned(), false)]);
        assert_eq!(rec.reroutes.len(), 1);
        assert!(matches!(rec.reroutes[0].1, RerouteOutcome::Stranded { .. }));

        sim.run_ticks(20, &mut rec);
        let frame = sim.snapshot();
        let ship = frame.get("Ship-1").unwrap();
        assert_eq!(ship.status, AgentStatus::Stranded);
        assert_eq!(ship.current_node, "B");
        assert_eq!(ship.next_node, "B");
        assert_eq!((ship.lat, ship.lon), (0.0, 1.0));

        // Reopening the destination does not un-strand it.
        sim.toggle_port("D");
        sim.run_ticks(20, &mut rec);
        assert_eq!(sim.snapshot().get("Ship-1").unwrap().status, AgentStatus::Stranded);
    }
}

// ── Tick loop & observer ──────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop {
    use super::*;
    use crate::{NoopObserver, SimError};

    #[test]
    fn snapshot_tick_counts_completed_updates() {
        let mut sim = sim(None);
        assert_eq!(sim.snapshot().tick, 0);
        assert_eq!(sim.update().tick, 1);
        assert_eq!(sim.update().tick, 2);
        assert_eq!(sim.now(), Tick(2));
    }

    #[test]
    fn snapshot_lists_ships_in_spawn_order() {
        let mut sim = sim(None);
        sim.spawn_agent("Zulu", "A", "D", 50.0).unwrap();
        sim.spawn_agent("Alpha", "D", "A", 50.0).unwrap();
        let frame = sim.update();
        let ids: Vec<_> = frame.agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["Zulu", "Alpha"]);
        assert!(frame.agents[0].lon > 0.0);
        assert!(frame.agents[1].lon < 3.0);
        assert!((frame.agents[0].heading - 90.0).abs() < 1e-9);
        assert!((frame.agents[1].heading - 270.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_json_shape() {
        let mut sim = sim(None);
        sim.spawn_agent("Ship-1", "A", "B", 50.0).unwrap();
        let json = sim.update().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let ship = &value["agents"][0];
        assert_eq!(value["tick"], 1);
        assert_eq!(ship["id"], "Ship-1");
        assert_eq!(ship["current_node"], "A");
        assert_eq!(ship["next_node"], "B");
        assert_eq!(ship["status"], "MOVING");
        assert!(ship["lat"].is_number());
        assert!(ship["lon"].is_number());
        assert!(ship["heading"].is_number());
    }

    #[test]
    fn run_calls_every_hook() {
        let mut sim = sim(Some(5));
        sim.spawn_agent("Ship-1", "A", "D", 50.0).unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.tick_starts, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.tick_ends.len(), 5);
        assert!(rec.tick_ends.iter().all(|&(_, under_way)| under_way == 1));
        assert_eq!(rec.frames, vec![1, 2, 3, 4, 5]);
        assert_eq!(rec.ended_at, Some(Tick(5)));
    }

    #[test]
    fn run_without_bound_is_a_config_error() {
        let mut sim = sim(None);
        assert!(matches!(sim.run(&mut NoopObserver), Err(SimError::Config(_))));
    }

    #[test]
    fn run_ticks_ignores_bound() {
        let mut sim = sim(Some(2));
        sim.run_ticks(7, &mut NoopObserver);
        assert_eq!(sim.now(), Tick(7));
    }
}

// ── Runner ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod runner_tests {
    use super::*;
    use crate::{Command, Runner};

    #[test]
    fn bounded_run_drops_frames_when_viewer_is_idle() {
        let handles = Runner::start(sim(Some(30))).unwrap();
        handles.commands.send(Command::spawn("Ship-1", "A", "D", 50.0)).unwrap();

        // Keep the receiver alive but never read it: the first frame fills the
        // slot and every later one is dropped.
        let report = handles.join.join().unwrap();
        assert_eq!(report.stats.ticks, 30);
        assert_eq!(report.stats.frames_sent, 1);
        assert_eq!(report.stats.frames_dropped, 29);
        assert_eq!(report.stats.commands, 1);
        assert_eq!(report.sim.now(), Tick(30));
        assert!(report.sim.agent("Ship-1").is_some());
        drop(handles.snapshots);
    }

    #[test]
    fn viewer_sees_increasing_ticks() {
        let handles = Runner::start(sim(Some(50))).unwrap();
        let ticks: Vec<u64> = handles.snapshots.iter().take(5).map(|f| f.tick).collect();
        assert_eq!(ticks.len(), 5);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
        handles.wait().unwrap();
    }

    #[test]
    fn open_ended_run_stops_when_everyone_leaves() {
        let handles = Runner::start(sim(None)).unwrap();
        handles.commands.send(Command::toggle("C")).unwrap();
        let report = handles.wait().unwrap();
        assert!(report.stats.ticks >= 1);
        assert_eq!(report.stats.commands, 1);
        assert_eq!(report.sim.graph().active_count(), 4);
    }

    #[test]
    fn commands_from_many_producers_are_applied() {
        let handles = Runner::start(sim(Some(200))).unwrap();
        let producers: Vec<_> = (0..4)
            .map(|i| {
                let tx = handles.commands.clone();
                std::thread::spawn(move || {
                    tx.send(Command::spawn(format!("Ship-{i}"), "A", "D", 10.0)).unwrap();
                })
            })
            .collect();
        for p in producers {
            p.join().unwrap();
        }
        let report = handles.join.join().unwrap();
        assert_eq!(report.sim.fleet().store.len(), 4);
        drop(handles.snapshots);
    }
}
