//! Command messages exchanged between clients through the relay
//!
//! On the wire a command is the JSON pair `["accelerate", 0]`: the command
//! name followed by its state.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Event channel carrying command messages
pub const CLIENT_COMMAND: &str = "cmd";
/// Event asking a client to report its status
pub const CLIENT_REPORT: &str = "report";
/// Event carrying a client's status answer
pub const CLIENT_STATUS: &str = "status";

/// Ship control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    #[serde(rename = "accelerate")]
    Accelerate,
    #[serde(rename = "left")]
    TurnLeft,
    #[serde(rename = "right")]
    TurnRight,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Accelerate => "accelerate",
            Command::TurnLeft => "left",
            Command::TurnRight => "right",
        }
    }

    /// Parse a wire name, `None` for anything unrecognized
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "accelerate" => Some(Command::Accelerate),
            "left" => Some(Command::TurnLeft),
            "right" => Some(Command::TurnRight),
            _ => None,
        }
    }
}

/// Whether a command is being pressed or released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CommandState {
    Start = 0,
    Stop = 1,
}

impl CommandState {
    #[inline]
    pub fn is_started(&self) -> bool {
        *self == CommandState::Start
    }
}

impl From<CommandState> for u8 {
    fn from(state: CommandState) -> Self {
        state as u8
    }
}

impl TryFrom<u8> for CommandState {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(CommandState::Start),
            1 => Ok(CommandState::Stop),
            other => Err(format!("invalid command state {other}")),
        }
    }
}

/// A single relayed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMessage {
    pub command: Command,
    pub state: CommandState,
}

impl CommandMessage {
    pub fn new(command: Command, state: CommandState) -> Self {
        Self { command, state }
    }

    pub fn encode(&self) -> String {
        // A (&str, u8) pair always serializes
        serde_json::json!([self.command.as_str(), u8::from(self.state)]).to_string()
    }

    /// Decode a wire message.
    ///
    /// Unknown command names decode to `Ok(None)` and are meant to be
    /// ignored; structurally broken input is an error.
    pub fn decode(json: &str) -> Result<Option<Self>> {
        let (name, state): (String, serde_json::Value) =
            serde_json::from_str(json).map_err(SimError::Protocol)?;
        let Some(command) = Command::from_wire(&name) else {
            return Ok(None);
        };
        let state = serde_json::from_value(state).map_err(SimError::Protocol)?;
        Ok(Some(Self { command, state }))
    }
}

/// A client's answer to a status report request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStatus {
    pub browser: String,
    pub width: u32,
    pub height: u32,
}

impl ClientStatus {
    pub fn encode(&self) -> String {
        // Plain strings and integers always serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn decode(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SimError::Protocol)
    }
}
