//! Simulation-level error type.

use sc_core::CoreError;
use sc_fleet::FleetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("malformed command: {0}")]
    Command(#[from] serde_json::Error),

    #[error("JSON encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("could not start runner thread: {0}")]
    Io(#[from] std::io::Error),

    #[error("runner thread panicked")]
    RunnerPanicked,
}

pub type SimResult<T> = Result<T, SimError>;
