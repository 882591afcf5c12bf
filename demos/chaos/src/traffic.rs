//! Request producers that feed the runner from other threads.

use std::io::BufRead;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use sc_core::SimRng;
use sc_sim::{Command, CommandSender};

/// A random fleet released over a stagger window.
#[derive(Clone, Debug)]
pub struct FleetPlan {
    pub ships:       usize,
    pub min_speed:   f64,
    pub max_speed:   f64,
    pub max_stagger: Duration,
}

impl FleetPlan {
    /// Draw every ship up front: `(release offset, spawn command)`, sorted by
    /// offset.  Start and destination always differ.
    pub fn draw(&self, codes: &[String], rng: &mut SimRng) -> Vec<(Duration, Command)> {
        if codes.len() < 2 || self.ships == 0 {
            return Vec::new();
        }
        let stagger_ms = self.max_stagger.as_millis() as u64;

        let mut plan: Vec<_> = (0..self.ships)
            .map(|i| {
                let from = rng.gen_range(0..codes.len());
                let mut to = rng.gen_range(0..codes.len() - 1);
                if to >= from {
                    to += 1;
                }
                let speed = if self.max_speed > self.min_speed {
                    rng.gen_range(self.min_speed..self.max_speed)
                } else {
                    self.min_speed
                };
                let delay = Duration::from_millis(rng.gen_range(0..=stagger_ms));
                (delay, Command::spawn(format!("Ship-{i}"), &codes[from], &codes[to], speed))
            })
            .collect();
        plan.sort_by_key(|(delay, _)| *delay);
        plan
    }
}

/// Send each drawn spawn at its release offset from now.  The thread ends
/// when the plan is exhausted or the runner has gone away.
pub fn release_fleet(plan: Vec<(Duration, Command)>, commands: CommandSender) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new().name("fleet-release".into()).spawn(move || {
        let start = Instant::now();
        for (offset, command) in plan {
            if let Some(wait) = offset.checked_sub(start.elapsed()) {
                thread::sleep(wait);
            }
            if commands.send(command).is_err() {
                debug!("runner stopped; remaining ships not released");
                return;
            }
        }
    })
}

/// Turn one console line into a command.
///
/// A JSON object is parsed as a [`Command`]; anything else is taken as a port
/// code to toggle.  Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.starts_with('{') {
        return match Command::parse_json(line) {
            Ok(command) => Some(command),
            Err(e) => {
                warn!(input = line, error = %e, "ignoring malformed command");
                None
            }
        };
    }
    Some(Command::toggle(line.to_ascii_uppercase()))
}

/// Forward commands read from `input` until it closes or the runner stops.
pub fn forward_commands<R: BufRead>(input: R, commands: &CommandSender) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        let Some(command) = parse_line(&line) else { continue };
        if commands.send(command).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> Vec<String> {
        ["NYC", "LON", "SIN"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn drawn_fleet_respects_bounds() {
        let plan = FleetPlan {
            ships:       200,
            min_speed:   50.0,
            max_speed:   150.0,
            max_stagger: Duration::from_secs(5),
        };
        let drawn = plan.draw(&codes(), &mut SimRng::new(7));
        assert_eq!(drawn.len(), 200);
        assert!(drawn.windows(2).all(|w| w[0].0 <= w[1].0));
        for (delay, command) in &drawn {
            assert!(*delay <= Duration::from_secs(5));
            let Command::Spawn { from, to, speed, .. } = command else {
                panic!("expected spawn, got {command:?}");
            };
            assert_ne!(from, to);
            assert!((50.0..150.0).contains(speed));
        }
    }

    #[test]
    fn draw_is_deterministic_per_seed() {
        let plan = FleetPlan {
            ships:       20,
            min_speed:   50.0,
            max_speed:   150.0,
            max_stagger: Duration::from_millis(100),
        };
        let a = plan.draw(&codes(), &mut SimRng::new(1));
        let b = plan.draw(&codes(), &mut SimRng::new(1));
        assert_eq!(a, b);
    }

    #[test]
    fn single_port_world_draws_nothing() {
        let plan = FleetPlan {
            ships:       5,
            min_speed:   50.0,
            max_speed:   150.0,
            max_stagger: Duration::ZERO,
        };
        assert!(plan.draw(&["NYC".to_string()], &mut SimRng::new(1)).is_empty());
    }

    #[test]
    fn console_lines() {
        assert_eq!(parse_line("  sin \n"), Some(Command::toggle("SIN")));
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line(r#"{"id":"ROT"}"#), Some(Command::toggle("ROT")));
        assert_eq!(
            parse_line(r#"{"type":"spawn","id":"S","from":"NYC","to":"SIN","speed":60}"#),
            Some(Command::spawn("S", "NYC", "SIN", 60.0)),
        );
        assert_eq!(parse_line("{broken"), None);
    }

    #[test]
    fn forwarding_stops_at_end_of_input() {
        let (tx, rx) = crossbeam::channel::unbounded::<Command>();
        forward_commands(std::io::Cursor::new("SIN\n\nROT\n"), &tx);
        drop(tx);
        let got: Vec<_> = rx.iter().collect();
        assert_eq!(got, vec![Command::toggle("SIN"), Command::toggle("ROT")]);
    }
}
