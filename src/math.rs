//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
use std::f64::consts::TAU;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;

/// Computes the bearing of `point` as seen from `centre`, in radians.
///
/// The bearing is measured clockwise from the positive y axis ("north")
/// and lies in the range `[0, 2π)`.
pub fn clockwise_bearing(centre: Point2d, point: Point2d) -> f64 {
    let dir: Vector2d = point - centre;
    let bearing = f64::atan2(dir.x, dir.y);
    if bearing < 0.0 {
        bearing + TAU
    } else {
        bearing
    }
}
