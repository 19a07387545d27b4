//! # Input message module
//!
//! Messages arrive as JSON objects of the form
//! `{"type": "<TYPE>", "payload": {...}}`, where the type is one of `POSE`,
//! `PATH` or `GAINS`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod gains;
mod path;
mod pose;

pub use gains::GainsMsg;
pub use path::PathMsg;
pub use pose::{Orientation, PoseMsg};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use serde_json::{self, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A message delivered to the tracker by one of its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    /// A new pose and velocity estimate of the robot
    Pose(PoseMsg),

    /// A new path to follow
    Path(PathMsg),

    /// New gains from the reconfiguration channel
    Gains(GainsMsg)
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum MsgParseError {
    #[error("Message contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Message has an invalid type ({0})")]
    InvalidType(String),

    #[error("Message of type {0} is expected to have a payload but it doesn't")]
    MissingPayload(&'static str),

    #[error("Message of type {0} has an invalid payload: {1}")]
    InvalidPayload(&'static str, serde_json::Error)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Msg {

    /// Parse a new message from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, MsgParseError> {
        // Parse the JSON string into a value
        let mut val: Value = serde_json::from_str(json_str)
            .map_err(MsgParseError::InvalidJson)?;

        // Get the type of the message
        let msg_type = match val["type"].as_str() {
            Some(s) => s.to_string(),
            None => return Err(MsgParseError::InvalidType(String::from(
                "Expected \"type\" to be a string"
            )))
        };

        let msg_type: &'static str = match msg_type.as_str() {
            "POSE" => "POSE",
            "PATH" => "PATH",
            "GAINS" => "GAINS",
            other => return Err(MsgParseError::InvalidType(
                format!("{} is not a recognised message type", other)
            ))
        };

        // All message types carry a payload
        let payload = match val.get_mut("payload") {
            Some(p) if !p.is_null() => p.take(),
            _ => return Err(MsgParseError::MissingPayload(msg_type))
        };

        let parse_err = |e| MsgParseError::InvalidPayload(msg_type, e);

        Ok(match msg_type {
            "POSE" => Msg::Pose(serde_json::from_value(payload).map_err(parse_err)?),
            "PATH" => Msg::Path(serde_json::from_value(payload).map_err(parse_err)?),
            _ => Msg::Gains(serde_json::from_value(payload).map_err(parse_err)?)
        })
    }

    /// Get the wire name of this message's type
    pub fn type_str(&self) -> &'static str {
        match self {
            Msg::Pose(_) => "POSE",
            Msg::Path(_) => "PATH",
            Msg::Gains(_) => "GAINS"
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
