//! `sc-fleet`: ship journey state, per-tick kinematics, and rerouting.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`state`]      | `Agent`, `AgentStatus`: per-ship journey state              |
//! | [`store`]      | `FleetStore`: `Vec<Agent>` indexed by `AgentId` + name map   |
//! | [`kinematics`] | `advance`: one tick of movement along the current lane      |
//! | [`reroute`]    | `reroute_around`: react to a port closing ahead of a ship   |
//! | [`engine`]     | `FleetEngine<R>`: spawn, advance-all, closure fan-out       |
//! | [`error`]      | `FleetError`, `FleetResult<T>`                               |
//!
//! # Movement model
//!
//! Ships sail lane by lane at a constant `speed_km` per tick.  The lane
//! length is recomputed from the port coordinates each tick, and the ship's
//! reported position is a straight lat/lon interpolation between the two
//! ports (not a great-circle point).
//!
//! When a port closes, every moving ship with that port still ahead is
//! re-planned from the port it is currently sailing towards.  The lane in
//! progress is never abandoned.  Reopening a port does not re-plan anyone.

pub mod engine;
pub mod error;
pub mod kinematics;
pub mod reroute;
pub mod state;
pub mod store;


pub use engine::{AdvanceReport, FleetEngine};
pub use error::{FleetError, FleetResult};
pub use kinematics::{Step, advance};
pub use reroute::{RerouteOutcome, reroute_around};
pub use state::{Agent, AgentStatus};
pub use store::FleetStore;
