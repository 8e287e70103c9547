//! Detour synthesis for scan segments that cross an obstacle.
//!
//! The planner is best-effort: every degenerate case (grazing contact,
//! roots off the segment, boundary-rejected bypass points) falls back to
//! the original `[p1, p2]` segment rather than failing. A fallback means
//! the obstacle is not avoided on that leg; it is logged, not retried.

use crate::models::{Obstacle, Waypoint};
use crate::spatial::{planar_distance, point_in_polygon, LocalFrame};

/// Extra clearance applied to the effective radius when placing bypass
/// points, so the detour skirts the keep-out circle instead of touching it.
const DETOUR_CLEARANCE_FACTOR: f64 = 1.2;

/// Parametric positions of the bypass points along the original segment.
const BYPASS_ENTRY_T: f64 = 0.25;
const BYPASS_EXIT_T: f64 = 0.75;

/// Exact intersections of the segment `p1..p2` with the obstacle's
/// effective-radius circle, as geographic points.
///
/// Solves the quadratic from substituting the segment's parametric form
/// into the circle equation in the obstacle's local plane; only roots with
/// `t` in `[0, 1]` are returned, in ascending `t` order.
pub fn line_circle_intersections(
    p1: Waypoint,
    p2: Waypoint,
    obstacle: &Obstacle,
) -> Vec<Waypoint> {
    let radius = obstacle.effective_radius_m();
    let frame = LocalFrame::new(obstacle.center());
    let (x1, y1) = frame.to_local(p1);
    let (x2, y2) = frame.to_local(p2);

    let dx = x2 - x1;
    let dy = y2 - y1;

    let a = dx * dx + dy * dy;
    let b = 2.0 * (x1 * dx + y1 * dy);
    let c = x1 * x1 + y1 * y1 - radius * radius;

    if a == 0.0 {
        return Vec::new();
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let sqrt_d = discriminant.sqrt();
    let mut intersections = Vec::new();
    for t in [(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)] {
        if (0.0..=1.0).contains(&t) {
            intersections.push(frame.to_geo(x1 + t * dx, y1 + t * dy));
        }
    }
    intersections
}

/// Plan a bypass for a colliding scan segment.
///
/// Only the first obstacle in `colliding` (lowest registry order) is
/// bypassed; simultaneous obstacles on one scan line are not composed. The
/// full registry list is consulted when choosing which side of the line to
/// detour to. Returns the replacement waypoint run for the segment,
/// `[p1, p2]` when no usable detour exists.
pub fn plan_detour(
    p1: Waypoint,
    p2: Waypoint,
    colliding: &[&Obstacle],
    all_obstacles: &[Obstacle],
    boundary: Option<&[Waypoint]>,
) -> Vec<Waypoint> {
    let Some(obstacle) = colliding.first() else {
        return vec![p1, p2];
    };

    // The segment must truly cross the keep-out circle; a graze or miss
    // yields fewer than two on-segment roots and the leg passes through.
    let intersections = line_circle_intersections(p1, p2, obstacle);
    if intersections.len() < 2 {
        return vec![p1, p2];
    }

    let frame = LocalFrame::new(obstacle.center());
    let (x1, y1) = frame.to_local(p1);
    let (x2, y2) = frame.to_local(p2);

    let dx = x2 - x1;
    let dy = y2 - y1;
    let length = (dx * dx + dy * dy).sqrt();
    if length < 1e-3 {
        return vec![p1, p2];
    }

    let ux = dx / length;
    let uy = dy / length;
    // Left-hand perpendicular of the scan direction.
    let perp_x = -uy;
    let perp_y = ux;

    let offset = obstacle.effective_radius_m() * DETOUR_CLEARANCE_FACTOR;

    let bypass_pair = |side: f64| -> [Waypoint; 2] {
        let off_x = perp_x * offset * side;
        let off_y = perp_y * offset * side;
        [
            frame.to_geo(x1 + dx * BYPASS_ENTRY_T + off_x, y1 + dy * BYPASS_ENTRY_T + off_y),
            frame.to_geo(x1 + dx * BYPASS_EXIT_T + off_x, y1 + dy * BYPASS_EXIT_T + off_y),
        ]
    };

    let left = bypass_pair(1.0);
    let right = bypass_pair(-1.0);

    // Side decision: take the side whose bypass points keep the larger
    // worst-case clearance from every other registered obstacle. With no
    // other obstacles both sides tie and the right side is used.
    let left_score = side_clearance(&left, obstacle, all_obstacles);
    let right_score = side_clearance(&right, obstacle, all_obstacles);
    let chosen = if left_score > right_score { left } else { right };

    let valid_detour: Vec<Waypoint> = chosen
        .into_iter()
        .filter(|point| match boundary {
            Some(polygon) => point_in_polygon(*point, polygon),
            None => true,
        })
        .collect();

    if valid_detour.is_empty() {
        tracing::warn!("no bypass point inside the operating boundary, keeping original segment");
        return vec![p1, p2];
    }

    let mut result = Vec::with_capacity(valid_detour.len() + 2);
    result.push(p1);
    result.extend(valid_detour);
    result.push(p2);
    result
}

/// Minimum clearance of a bypass pair from every obstacle other than the
/// one being bypassed. Infinite when there is no other obstacle.
fn side_clearance(bypass: &[Waypoint; 2], bypassed: &Obstacle, all_obstacles: &[Obstacle]) -> f64 {
    all_obstacles
        .iter()
        .filter(|other| other.id != bypassed.id)
        .flat_map(|other| {
            bypass
                .iter()
                .map(move |point| planar_distance(*point, other.center()) - other.effective_radius_m())
        })
        .fold(f64::INFINITY, f64::min)
}
