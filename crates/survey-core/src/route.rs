//! Path assembly: merges segmentation, collision checks, and detours into
//! the final routed waypoint sequence.

use crate::collision::colliding_obstacles;
use crate::detour::plan_detour;
use crate::models::{SegmentKind, Waypoint};
use crate::registry::ObstacleRegistry;
use crate::segment::identify_segments;
use std::collections::HashSet;

/// Route a coverage path around the registered obstacles.
///
/// Scan segments that cross an obstacle are replaced by a detour run; turn
/// segments and collision-free scan segments pass through untouched. Every
/// original waypoint is represented in the output unless superseded by a
/// detour. Inputs with fewer than two waypoints, or an empty registry,
/// are returned unchanged.
pub fn route(
    waypoints: &[Waypoint],
    registry: &ObstacleRegistry,
    boundary: Option<&[Waypoint]>,
) -> Vec<Waypoint> {
    if waypoints.len() < 2 || registry.is_empty() {
        return waypoints.to_vec();
    }

    let segments = identify_segments(waypoints);
    let obstacles = registry.list();

    let mut result: Vec<Waypoint> = Vec::with_capacity(waypoints.len());
    let mut processed: HashSet<usize> = HashSet::new();

    for segment in &segments {
        match segment.kind {
            SegmentKind::Scan => {
                let p1 = waypoints[segment.start];
                let p2 = waypoints[segment.end];
                let colliding = colliding_obstacles(obstacles, p1, p2);

                if colliding.is_empty() {
                    if processed.insert(segment.start) {
                        result.push(p1);
                    }
                    if processed.insert(segment.end) {
                        result.push(p2);
                    }
                } else {
                    let detoured = plan_detour(p1, p2, &colliding, obstacles, boundary);
                    let added = detoured.len();
                    // Dedup by coordinate value: a detour may re-emit an
                    // endpoint a previous segment already appended.
                    for point in detoured {
                        if !result.contains(&point) {
                            result.push(point);
                        }
                    }
                    processed.insert(segment.start);
                    processed.insert(segment.end);
                    tracing::info!(
                        start = segment.start,
                        end = segment.end,
                        waypoints = added,
                        "scan line crosses an obstacle, segmented around it"
                    );
                }
            }
            SegmentKind::Turn => {
                for idx in [segment.start, segment.end] {
                    if processed.insert(idx) {
                        result.push(waypoints[idx]);
                    }
                }
            }
        }
    }

    // Safety net for malformed or empty segmentations: no original index
    // may be dropped silently.
    for (idx, point) in waypoints.iter().enumerate() {
        if processed.insert(idx) {
            result.push(*point);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{meters_to_lat, meters_to_lon, planar_distance};

    /// Serpentine grid: north-south scan lines joined by short east turns.
    fn lawnmower(origin: Waypoint, line_length_m: f64, spacing_m: f64, lines: usize) -> Vec<Waypoint> {
        let mut waypoints = Vec::new();
        for line in 0..lines {
            let lon = origin.lon + meters_to_lon(line as f64 * spacing_m, origin.lat);
            let near = Waypoint::new(origin.lat, lon);
            let far = Waypoint::new(origin.lat + meters_to_lat(line_length_m), lon);
            if line % 2 == 0 {
                waypoints.push(near);
                waypoints.push(far);
            } else {
                waypoints.push(far);
                waypoints.push(near);
            }
        }
        waypoints
    }

    #[test]
    fn passthrough_without_obstacles() {
        let registry = ObstacleRegistry::new();
        let waypoints = lawnmower(Waypoint::new(33.0, -117.0), 200.0, 20.0, 4);
        assert_eq!(route(&waypoints, &registry, None), waypoints);
    }

    #[test]
    fn passthrough_when_nothing_collides() {
        let mut registry = ObstacleRegistry::new();
        // Obstacle a kilometer west of the grid.
        registry.add(Waypoint::new(33.0, -117.0 - meters_to_lon(1000.0, 33.0)), 30.0, 5.0);

        let waypoints = lawnmower(Waypoint::new(33.0, -117.0), 200.0, 20.0, 4);
        assert_eq!(route(&waypoints, &registry, None), waypoints);
    }

    #[test]
    fn short_inputs_are_untouched() {
        let mut registry = ObstacleRegistry::new();
        registry.add(Waypoint::new(33.0, -117.0), 30.0, 5.0);

        assert!(route(&[], &registry, None).is_empty());
        let single = [Waypoint::new(33.0, -117.0)];
        assert_eq!(route(&single, &registry, None), single);
    }

    #[test]
    fn end_to_end_single_scan_detour() {
        let mut registry = ObstacleRegistry::new();
        registry.add(Waypoint::new(0.0, 0.005), 50.0, 1.0);

        let p1 = Waypoint::new(0.0, 0.0);
        let p2 = Waypoint::new(0.0, 0.01);
        let routed = route(&[p1, p2], &registry, None);

        assert_eq!(routed.len(), 4);
        assert_eq!(routed[0], p1);
        assert_eq!(routed[3], p2);
        // Entry/exit at the quarter points, offset off the scan line.
        assert!((routed[1].lon - 0.0025).abs() < 1e-6);
        assert!((routed[2].lon - 0.0075).abs() < 1e-6);
        assert!(routed[1].lat.abs() > 1e-6);
        assert!((routed[1].lat - routed[2].lat).abs() < 1e-9);
    }

    #[test]
    fn routing_is_idempotent_after_one_pass() {
        let mut registry = ObstacleRegistry::new();
        registry.add(Waypoint::new(0.0, 0.005), 50.0, 1.0);

        let first = route(&[Waypoint::new(0.0, 0.0), Waypoint::new(0.0, 0.01)], &registry, None);
        let second = route(&first, &registry, None);
        assert_eq!(first, second);
    }

    #[test]
    fn grid_detours_only_the_blocked_line() {
        let origin = Waypoint::new(33.0, -117.0);
        let waypoints = lawnmower(origin, 400.0, 30.0, 4);

        // Obstacle sitting on the second scan line, halfway up.
        let blocked_lon = origin.lon + meters_to_lon(30.0, origin.lat);
        let mut registry = ObstacleRegistry::new();
        registry.add(
            Waypoint::new(origin.lat + meters_to_lat(200.0), blocked_lon),
            20.0,
            5.0,
        );

        let routed = route(&waypoints, &registry, None);
        // One scan line gains two bypass points.
        assert_eq!(routed.len(), waypoints.len() + 2);
        // Every original waypoint survives.
        for wp in &waypoints {
            assert!(routed.contains(wp));
        }
        // Bypass points stay clear of the keep-out circle.
        let obstacle = registry.list()[0].clone();
        for pair in routed.windows(2) {
            assert!(!crate::collision::segment_collides(pair[0], pair[1], &obstacle));
        }
    }

    #[test]
    fn boundary_rejection_keeps_original_line() {
        let mut registry = ObstacleRegistry::new();
        registry.add(Waypoint::new(0.0, 0.005), 50.0, 1.0);

        // Boundary hugging the scan line so tightly that both offset bypass
        // points fall outside it.
        let margin = meters_to_lat(10.0);
        let boundary = vec![
            Waypoint::new(-margin, -0.001),
            Waypoint::new(-margin, 0.011),
            Waypoint::new(margin, 0.011),
            Waypoint::new(margin, -0.001),
        ];

        let p1 = Waypoint::new(0.0, 0.0);
        let p2 = Waypoint::new(0.0, 0.01);
        let routed = route(&[p1, p2], &registry, Some(&boundary));
        assert_eq!(routed, vec![p1, p2]);
    }

    #[test]
    fn turn_segments_pass_through() {
        let origin = Waypoint::new(33.0, -117.0);
        let waypoints = lawnmower(origin, 400.0, 30.0, 2);

        // Obstacle on the turn leg at the far end of the grid; turns are
        // not detoured, so the path is unchanged even though the turn
        // crosses the circle.
        let far_lat = origin.lat + meters_to_lat(400.0);
        let mid_turn_lon = origin.lon + meters_to_lon(15.0, origin.lat);
        let mut registry = ObstacleRegistry::new();
        registry.add(Waypoint::new(far_lat, mid_turn_lon), 5.0, 1.0);

        let routed = route(&waypoints, &registry, None);
        assert_eq!(routed, waypoints);
    }

    #[test]
    fn all_waypoints_survive_with_many_obstacles() {
        let origin = Waypoint::new(33.0, -117.0);
        let waypoints = lawnmower(origin, 400.0, 40.0, 5);

        let mut registry = ObstacleRegistry::new();
        for line in 0..5 {
            registry.add(
                Waypoint::new(
                    origin.lat + meters_to_lat(100.0 + 40.0 * line as f64),
                    origin.lon + meters_to_lon(40.0 * line as f64, origin.lat),
                ),
                10.0,
                2.0,
            );
        }

        let routed = route(&waypoints, &registry, None);
        for wp in &waypoints {
            assert!(routed.contains(wp), "lost waypoint {wp:?}");
        }
        // Detours only ever add points.
        assert!(routed.len() >= waypoints.len());

        let distances: Vec<f64> = routed
            .windows(2)
            .map(|pair| planar_distance(pair[0], pair[1]))
            .collect();
        assert!(distances.iter().all(|d| d.is_finite()));
    }
}
