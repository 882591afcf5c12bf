//! Inbound requests applied at tick boundaries.

use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

/// A request from outside the tick loop.
///
/// On the wire the variant is carried in a `"type"` field:
///
/// ```json
/// {"type":"toggle_port","id":"SIN"}
/// {"type":"spawn","id":"Ship-7","from":"NYC","to":"TOK","speed":80.0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Flip a port between open and closed.
    TogglePort { id: String },
    /// Add a ship; `speed` is in km per tick.
    Spawn { id: String, from: String, to: String, speed: f64 },
}

/// The untagged toggle message sent by map viewers: `{"id":"SIN"}`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BareToggle {
    id: String,
}

impl Command {
    pub fn toggle(port: impl Into<String>) -> Self {
        Command::TogglePort { id: port.into() }
    }

    pub fn spawn(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>, speed: f64) -> Self {
        Command::Spawn { id: id.into(), from: from.into(), to: to.into(), speed }
    }

    /// Parse one JSON message, accepting either the tagged form or a bare
    /// `{"id": ...}` toggle.
    ///
    /// The error reported is the one from the tagged form.
    pub fn parse_json(text: &str) -> SimResult<Command> {
        match serde_json::from_str::<Command>(text) {
            Ok(cmd) => Ok(cmd),
            Err(tagged) => match serde_json::from_str::<BareToggle>(text) {
                Ok(bare) => Ok(Command::TogglePort { id: bare.id }),
                Err(_) => Err(tagged.into()),
            },
        }
    }

    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string(self).map_err(SimError::Encode)
    }
}
