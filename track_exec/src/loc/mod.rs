//! # Localisation module
//!
//! This module holds the tracker's view of where the robot is, built from the
//! pose and velocity estimates delivered by the localisation system.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::convert::TryFrom;

use comms_if::msg::{Orientation, PoseMsg};
use nalgebra::{Point2, Quaternion, UnitQuaternion, Vector3};
use serde::Serialize;
use util::maths::wrap_pi;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The most recent state estimate of the robot, in the world frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct RobotState {
    /// Position on the world XY plane.
    ///
    /// Units: meters
    pub position_m: Point2<f64>,

    /// Heading anticlockwise from the world X axis, in the range (-pi, pi].
    ///
    /// Units: radians
    pub yaw_rad: f64,

    /// Magnitude of the linear velocity vector.
    ///
    /// Units: meters/second
    pub speed_ms: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors converting a pose message into a robot state.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PoseError {
    #[error("Pose quaternion has zero norm and cannot describe an attitude")]
    DegenerateQuaternion,

    #[error("Pose contains a non-finite value")]
    NonFinite
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RobotState {

    /// Create a new state, wrapping the yaw into (-pi, pi].
    pub fn new(position_m: Point2<f64>, yaw_rad: f64, speed_ms: f64) -> Self {
        Self {
            position_m,
            yaw_rad: wrap_pi(yaw_rad),
            speed_ms
        }
    }
}

impl TryFrom<&PoseMsg> for RobotState {
    type Error = PoseError;

    fn try_from(msg: &PoseMsg) -> Result<Self, Self::Error> {
        let yaw_rad = match msg.orientation {
            Orientation::Yaw { yaw_rad } => yaw_rad,
            Orientation::Quaternion { x, y, z, w } => {
                let q = Quaternion::new(w, x, y, z);
                if q.norm() < std::f64::EPSILON {
                    return Err(PoseError::DegenerateQuaternion)
                }

                // Only the rotation about Z matters on the plane
                UnitQuaternion::from_quaternion(q).euler_angles().2
            }
        };

        let v = msg.velocity_ms;
        let speed_ms = Vector3::new(v[0], v[1], v[2]).norm();

        let state = Self::new(
            Point2::new(msg.position_m[0], msg.position_m[1]),
            yaw_rad,
            speed_ms
        );

        if !(state.position_m.x.is_finite()
            && state.position_m.y.is_finite()
            && state.yaw_rad.is_finite()
            && state.speed_ms.is_finite())
        {
            return Err(PoseError::NonFinite)
        }

        Ok(state)
    }
}
