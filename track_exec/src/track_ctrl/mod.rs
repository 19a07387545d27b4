//! # Path tracking control module
//!
//! Path tracking is responsible for producing the velocity command which keeps
//! the robot moving along the most recent path. It is made of two independent
//! loops:
//!
//! - Steering: a goal point is picked from the path, the first point which is
//!   at least the lookahead distance away from the robot (pure pursuit). The
//!   yaw rate demand is then proportional to the heading error between the
//!   robot's heading and the direction to the goal point.
//! - Speed: a PID controller drives the measured speed towards the target
//!   speed, with its output saturated to the configured bounds.
//!
//! Pose estimates only update the stored robot state. A command is produced
//! once for each path received, using whichever pose was stored last.
//!
//! Gains can be changed while running. New gains are staged and applied
//! together at the start of the next cycle, so a cycle never mixes old and new
//! gains.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod controllers;
pub mod goal;
pub mod params;
pub mod path;
pub mod state;
pub mod steering;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use controllers::*;
pub use goal::find_goal_point;
pub use params::{ConfigError, ControllerGains, Params};
pub use path::PathPoints;
pub use state::*;
pub use steering::compute_yaw_rate;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur during path tracking.
///
/// All of these are detected before any state is modified, so a failed cycle
/// leaves the tracker exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum TrackCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoad(util::params::LoadError),

    /// A control cycle was requested before any pose has been received.
    #[error("No pose has been received yet")]
    UninitializedState,

    /// The path given to the control cycle has no points in it.
    #[error("Received a path with no points")]
    EmptyPath,

    /// A parameter or gain is outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError)
}
