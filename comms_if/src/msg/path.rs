//! Path message

use serde::{Serialize, Deserialize};

/// An ordered sequence of waypoints to follow, in the world frame.
///
/// The tracker rejects paths with no points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathMsg {
    /// Waypoint positions, units: meters
    pub points_m: Vec<[f64; 2]>
}
