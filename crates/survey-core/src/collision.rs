//! Segment-versus-obstacle collision tests.

use crate::models::{Obstacle, Waypoint};
use crate::spatial::LocalFrame;

/// Squared-length floor below which a segment is treated as a point.
const DEGENERATE_LEN_SQ: f64 = 1e-9;

/// Check whether a segment enters an obstacle's keep-out circle.
///
/// Works in the obstacle's local plane: the closest point on the segment to
/// the circle center is found via the clamped projection parameter, and its
/// squared distance is compared against `effective_radius²` with strict
/// `<`. A segment that only touches the boundary does not collide; the
/// same policy applies to the degenerate point case.
pub fn segment_collides(p1: Waypoint, p2: Waypoint, obstacle: &Obstacle) -> bool {
    let radius = obstacle.effective_radius_m();
    let radius_sq = radius * radius;

    let frame = LocalFrame::new(obstacle.center());
    let (x1, y1) = frame.to_local(p1);
    let (x2, y2) = frame.to_local(p2);

    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx * dx + dy * dy;

    if len_sq < DEGENERATE_LEN_SQ {
        return x1 * x1 + y1 * y1 < radius_sq;
    }

    // Closest point on the segment to the circle center (local origin).
    let t = (-(x1 * dx + y1 * dy) / len_sq).clamp(0.0, 1.0);
    let closest_x = x1 + t * dx;
    let closest_y = y1 + t * dy;

    closest_x * closest_x + closest_y * closest_y < radius_sq
}

/// All obstacles whose keep-out circle the segment enters, in registry
/// (insertion) order.
pub fn colliding_obstacles<'a>(
    obstacles: &'a [Obstacle],
    p1: Waypoint,
    p2: Waypoint,
) -> Vec<&'a Obstacle> {
    obstacles
        .iter()
        .filter(|obstacle| segment_collides(p1, p2, obstacle))
        .collect()
}
