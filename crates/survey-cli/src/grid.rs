//! Serpentine coverage-grid generation.
//!
//! Produces the classic lawnmower scan pattern: parallel north-south scan
//! lines joined by short eastward turns, alternating direction so the path
//! is flyable end to end.

use survey_core::spatial::{meters_to_lat, meters_to_lon};
use survey_core::Waypoint;

/// Generate a serpentine scan-line grid.
///
/// `origin` is the southwest corner. Each scan line runs `line_length_m`
/// north; consecutive lines are `spacing_m` apart, and odd lines run
/// southward so the end of one line connects to the start of the next.
/// Fewer than one line, or non-positive dimensions, yield an empty path.
pub fn serpentine_grid(
    origin: Waypoint,
    line_length_m: f64,
    spacing_m: f64,
    lines: usize,
) -> Vec<Waypoint> {
    if lines == 0 || line_length_m <= 0.0 || spacing_m <= 0.0 {
        return Vec::new();
    }

    let far_lat = origin.lat + meters_to_lat(line_length_m);
    let mut waypoints = Vec::with_capacity(lines * 2);

    for line in 0..lines {
        let lon = origin.lon + meters_to_lon(line as f64 * spacing_m, origin.lat);
        let near = Waypoint::new(origin.lat, lon);
        let far = Waypoint::new(far_lat, lon);
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
