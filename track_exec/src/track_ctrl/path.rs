//! Path points to be tracked

use comms_if::msg::PathMsg;
use nalgebra::Point2;

/// An ordered sequence of world frame positions describing the desired
/// trajectory.
///
/// Paths are never modified once received, a new path replaces the old one
/// entirely. An empty path can be constructed but will be rejected by the
/// tracker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathPoints {
    points_m: Vec<Point2<f64>>
}

impl PathPoints {
    pub fn new(points_m: Vec<Point2<f64>>) -> Self {
        Self { points_m }
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points_m
    }

    pub fn is_empty(&self) -> bool {
        self.points_m.is_empty()
    }
}

impl From<&PathMsg> for PathPoints {
    fn from(msg: &PathMsg) -> Self {
        Self::new(
            msg.points_m
                .iter()
                .map(|p| Point2::new(p[0], p[1]))
                .collect()
        )
    }
}
