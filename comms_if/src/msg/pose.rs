//! Pose and velocity estimate message

use serde::{Serialize, Deserialize};

/// A pose and velocity estimate of the robot in the world frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseMsg {
    /// Position of the robot on the XY plane of the world frame.
    ///
    /// Units: meters
    pub position_m: [f64; 2],

    /// Orientation of the robot in the world frame.
    pub orientation: Orientation,

    /// Linear velocity vector of the robot.
    ///
    /// Units: meters/second
    pub velocity_ms: [f64; 3]
}

/// The orientation part of a pose, which collaborators may give either as a
/// heading or as a full attitude quaternion.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Orientation {
    /// Heading about the world Z axis, anticlockwise from world X.
    Yaw {
        yaw_rad: f64
    },

    /// Attitude quaternion rotating the world frame into the robot body frame.
    Quaternion {
        x: f64,
        y: f64,
        z: f64,
        w: f64
    }
}
