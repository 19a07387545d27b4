//! Gain reconfiguration message

use serde::{Serialize, Deserialize};

/// Live-reloadable tracker gains.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainsMsg {
    /// Setpoint of the speed controller, meters/second
    pub target_speed_ms: f64,

    /// Speed controller proportional gain
    pub speed_k_p: f64,

    /// Speed controller integral gain
    pub speed_k_i: f64,

    /// Speed controller derivative gain
    pub speed_k_d: f64,

    /// Proportional gain from heading error to yaw rate
    pub yaw_k_p: f64,

    /// Lookahead distance of the goal point selection, meters
    pub lookahead_m: f64
}
