//! Mission-file loading: the JSON interface consumed by CLI tools in place
//! of the map UI.

use crate::models::Waypoint;
use crate::registry::ObstacleRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

fn default_safe_distance() -> f64 {
    1.0
}

/// Obstacle description as written in a mission file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub lat: f64,
    pub lon: f64,
    pub radius_m: f64,
    #[serde(default = "default_safe_distance")]
    pub safe_distance_m: f64,
}

/// A complete routing job: planned coverage waypoints, keep-out obstacles,
/// and an optional operating boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionPlan {
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    #[serde(default)]
    pub boundary: Option<Vec<Waypoint>>,
}

#[derive(Debug, Error)]
pub enum MissionError {
    #[error("failed to read mission file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse mission file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid mission: {0}")]
    Invalid(String),
}

impl MissionPlan {
    /// Load and validate a mission plan from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MissionError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate a mission plan from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MissionError> {
        let plan: Self = serde_json::from_str(json)?;
        let errors = plan.validate();
        if !errors.is_empty() {
            return Err(MissionError::Invalid(errors.join("; ")));
        }
        Ok(plan)
    }

    /// Validate mission contents.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, wp) in self.waypoints.iter().enumerate() {
            if !wp.lat.is_finite() || !wp.lon.is_finite() {
                errors.push(format!("waypoint {i} has non-finite coordinates"));
            }
        }

        for (i, obstacle) in self.obstacles.iter().enumerate() {
            if !obstacle.lat.is_finite() || !obstacle.lon.is_finite() {
                errors.push(format!("obstacle {i} has non-finite coordinates"));
            }
            if obstacle.radius_m < 0.0 {
                errors.push(format!("obstacle {i} has negative radius"));
            }
            if obstacle.safe_distance_m < 0.0 {
                errors.push(format!("obstacle {i} has negative safe distance"));
            }
        }

        if let Some(boundary) = &self.boundary {
            if boundary.len() < 3 {
                errors.push("boundary polygon must have at least 3 vertices".to_string());
            }
        }

        errors
    }

    /// Build a registry populated with this mission's obstacles, in file
    /// order.
    pub fn build_registry(&self) -> ObstacleRegistry {
        let mut registry = ObstacleRegistry::new();
        for spec in &self.obstacles {
            registry.add(
                Waypoint::new(spec.lat, spec.lon),
                spec.radius_m,
                spec.safe_distance_m,
            );
        }
        registry
    }
}
