//! # Velocity command

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A velocity command for the actuation layer.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VelCmd {
    /// Forward speed demand in meters/second.
    ///
    /// Positive speeds are "forwards", negative speeds are "backwards".
    pub linear_ms: f64,

    /// Yaw rate demand in radians/second.
    ///
    /// Follows the right hand rule about the robot's Z+ (upwards) axis, so that a positive rate
    /// turns the robot to the left.
    pub angular_rads: f64
}
