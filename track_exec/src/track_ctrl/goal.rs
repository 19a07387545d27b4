//! # Goal point selection
//!
//! Picks the point on the path the robot should steer towards.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{distance, Point2};

use super::TrackCtrlError;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the goal point for the robot at `position_m`.
///
/// The path is scanned from its first point and the first point at least
/// `lookahead_m` away from the robot is returned. If every point is inside the
/// lookahead radius the last point of the path is returned, so the robot keeps
/// heading for the end of the path rather than stopping short.
///
/// An empty path has no goal and gives `TrackCtrlError::EmptyPath`.
pub fn find_goal_point(
    position_m: &Point2<f64>,
    path_m: &[Point2<f64>],
    lookahead_m: f64
) -> Result<Point2<f64>, TrackCtrlError> {
    let last = match path_m.last() {
        Some(p) => p,
        None => return Err(TrackCtrlError::EmptyPath)
    };

    Ok(*path_m
        .iter()
        .find(|p| distance(position_m, *p) >= lookahead_m)
        .unwrap_or(last))
}
