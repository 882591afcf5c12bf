//! `sc-sim`: tick loop, command/snapshot protocol, and real-time runner.
//!
//! # Tick loop
//!
//! ```text
//! loop every config.tick_interval:
//!   ① Commands: drain queued Command::{TogglePort, Spawn}; closing a port
//!                re-plans every moving ship that still has it ahead.
//!   ② Update  : advance every ship one tick along its current lane
//!                (parallel with the `parallel` feature).
//!   ③ Snapshot: capture all ships; offer to the viewer, drop if busy.
//! ```
//!
//! [`Sim`] does ② and ③ on demand and applies ① when asked; [`Runner`] adds
//! the thread, the pacing, and the channels.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs per-ship kinematics on Rayon's thread pool.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sc_core::SimConfig;
//! use sc_sim::{Command, Runner, SimBuilder};
//! use sc_spatial::DijkstraRouter;
//!
//! let sim = SimBuilder::new(SimConfig::default(), graph, DijkstraRouter).build()?;
//! let handles = Runner::start(sim)?;
//! handles.commands.send(Command::spawn("Ship-1", "NYC", "SIN", 80.0))?;
//! for frame in handles.snapshots.iter() {
//!     println!("{}", frame.to_json()?);
//! }
//! ```

pub mod builder;
pub mod command;
pub mod error;
pub mod observer;
pub mod runner;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use command::Command;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use runner::{CommandSender, RunReport, RunStats, Runner, RunnerHandles};
pub use sim::Sim;
pub use snapshot::{AgentSnapshot, PortStatus, Snapshot};
