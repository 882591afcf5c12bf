//! Fleet-subsystem error type.

use sc_core::{AgentId, NodeId};
use thiserror::Error;

/// Why a spawn was refused or a ship could not be moved.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("unknown port code {0:?}")]
    UnknownPort(String),

    #[error("node {0} is not in the port graph")]
    NodeOutOfRange(NodeId),

    #[error("start and destination are both {0}")]
    SameEndpoints(NodeId),

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("agent name {0:?} is already in use")]
    DuplicateAgent(String),

    #[error("speed must be a positive number of km per tick, got {0}")]
    InvalidSpeed(f64),

    #[error("agent {0} has no lane left to sail")]
    PathExhausted(AgentId),
}

pub type FleetResult<T> = Result<T, FleetError>;
