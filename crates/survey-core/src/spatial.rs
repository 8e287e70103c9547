//! Spatial math: local planar projection and distance primitives.
//!
//! All geometry runs in a meters-scaled tangent plane centered on a single
//! obstacle. The equirectangular projection used here is only locally
//! accurate (tens of km) and must not be reused across widely separated
//! centers.

use crate::models::Waypoint;

/// Mean Earth radius in meters. Radian-valued angular deltas scaled by this
/// constant give planar offsets in true meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Local equirectangular projection centered on a reference point.
///
/// `to_local` followed by `to_geo` is an identity within floating-point
/// tolerance for any point near the center.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    center_lat: f64,
    center_lon: f64,
    cos_lat: f64,
}

impl LocalFrame {
    /// Create a frame centered at the given point.
    pub fn new(center: Waypoint) -> Self {
        Self {
            center_lat: center.lat,
            center_lon: center.lon,
            cos_lat: center.lat.to_radians().cos(),
        }
    }

    /// Project a geographic point into the local plane, in meters.
    /// x is east, y is north; the frame center maps to the origin.
    pub fn to_local(&self, point: Waypoint) -> (f64, f64) {
        let x = (point.lon - self.center_lon).to_radians() * EARTH_RADIUS_M * self.cos_lat;
        let y = (point.lat - self.center_lat).to_radians() * EARTH_RADIUS_M;
        (x, y)
    }

    /// Map a local (x, y) in meters back to geographic coordinates.
    pub fn to_geo(&self, x: f64, y: f64) -> Waypoint {
        let lat = self.center_lat + (y / EARTH_RADIUS_M).to_degrees();
        let lon = self.center_lon + (x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees();
        Waypoint::new(lat, lon)
    }
}

/// Planar distance between two geographic points in meters.
///
/// Equirectangular approximation with the longitude term scaled by the
/// cosine of the mean latitude. Valid for the short distances a survey
/// mission covers; not a great-circle distance.
pub fn planar_distance(a: Waypoint, b: Waypoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let mean_lat = ((a.lat + b.lat) / 2.0).to_radians();

    let x = dlon * mean_lat.cos();
    let y = dlat;
    (x * x + y * y).sqrt() * EARTH_RADIUS_M
}

/// Convert a north/south offset in meters to degrees latitude.
pub fn meters_to_lat(meters: f64) -> f64 {
    (meters / EARTH_RADIUS_M).to_degrees()
}

/// Convert an east/west offset in meters to degrees longitude.
/// Requires the reference latitude for proper scaling.
pub fn meters_to_lon(meters: f64, ref_lat_deg: f64) -> f64 {
    let cos_lat = ref_lat_deg.to_radians().cos().abs().max(1e-9);
    (meters / (EARTH_RADIUS_M * cos_lat)).to_degrees()
}

/// Check whether a point lies inside a polygon using ray casting.
///
/// The crossing test is evaluated per edge, so horizontal-in-longitude
/// edges never reference a stale crossing value. Polygons with fewer than
/// 3 vertices contain nothing.
pub fn point_in_polygon(point: Waypoint, polygon: &[Waypoint]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = polygon[i];
        let vj = polygon[j];

        // Edge straddles the ray in longitude; crossing latitude computed here.
        if (vi.lon > point.lon) != (vj.lon > point.lon) {
            let crossing_lat =
                (point.lon - vi.lon) * (vj.lat - vi.lat) / (vj.lon - vi.lon) + vi.lat;
            if point.lat < crossing_lat {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}
