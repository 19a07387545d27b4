//! # Steering law
//!
//! Proportional heading control towards the goal point. The yaw rate is not
//! saturated here, limiting it is left to the actuation layer.

use nalgebra::Point2;
use util::maths::get_ang_dist;

/// The heading from `position_m` to `goal_m`, anticlockwise from world X.
pub fn desired_heading(position_m: &Point2<f64>, goal_m: &Point2<f64>) -> f64 {
    let d = goal_m - position_m;
    d.y.atan2(d.x)
}

/// Shortest signed angle from the robot's heading to the direction of the goal,
/// in (-pi, pi]. Positive when the goal is to the left.
pub fn heading_error(position_m: &Point2<f64>, heading_rad: f64, goal_m: &Point2<f64>) -> f64 {
    get_ang_dist(heading_rad, desired_heading(position_m, goal_m))
}

/// Compute the yaw rate demand steering the robot towards `goal_m`.
pub fn compute_yaw_rate(
    position_m: &Point2<f64>,
    heading_rad: f64,
    goal_m: &Point2<f64>,
    yaw_k_p: f64
) -> f64 {
    yaw_k_p * heading_error(position_m, heading_rad, goal_m)
}
