//! Core data models for survey route planning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic waypoint in decimal degrees.
///
/// Waypoints are immutable value types; the router never mutates an input
/// sequence in place, it produces a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Stable handle identifying an obstacle in the registry.
///
/// Two obstacles may share coordinates, so identity is by handle, not value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u64);

/// A circular keep-out obstacle.
///
/// Pure data: display artifacts (markers, overlay circles) belong to a UI
/// layer keyed by `ObstacleId`, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub lat: f64,
    pub lon: f64,
    /// Physical radius in meters
    pub radius_m: f64,
    /// Extra keep-out margin in meters
    pub safe_distance_m: f64,
    pub created_at: DateTime<Utc>,
}

impl Obstacle {
    /// True keep-out radius: physical radius plus safety margin.
    ///
    /// Recomputed on every read so radius/safe-distance updates take effect
    /// immediately.
    pub fn effective_radius_m(&self) -> f64 {
        self.radius_m + self.safe_distance_m
    }

    pub fn center(&self) -> Waypoint {
        Waypoint::new(self.lat, self.lon)
    }

    /// Validate obstacle parameters.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.lat.is_finite() || !self.lon.is_finite() {
            errors.push("Obstacle center must be finite coordinates".to_string());
        }
        if self.radius_m < 0.0 {
            errors.push("Obstacle radius cannot be negative".to_string());
        }
        if self.safe_distance_m < 0.0 {
            errors.push("Obstacle safe distance cannot be negative".to_string());
        }
        errors
    }
}

/// Request to update an existing obstacle (fields left `None` are unchanged).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateObstacleRequest {
    pub radius_m: Option<f64>,
    pub safe_distance_m: Option<f64>,
}

/// Classification of one adjacent waypoint pair in a coverage grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Long traversal leg intended to maximize sensor coverage
    Scan,
    /// Short connective leg joining one scan line to the next
    Turn,
}

/// A labeled adjacent waypoint-index pair. Derived during routing, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledSegment {
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
}
