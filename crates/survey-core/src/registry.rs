//! Obstacle registry: ordered ownership of keep-out obstacles.
//!
//! The registry is the single owner of obstacle data. Display layers keep
//! their own side-tables keyed by [`ObstacleId`] and stay in sync through
//! [`RegistryEvent`] notifications; no rendering handle ever lives on the
//! core entity.
//!
//! The registry performs no internal synchronization. Callers that mutate
//! it from one thread while routing from another must serialize access.

use crate::models::{Obstacle, ObstacleId, UpdateObstacleRequest, Waypoint};
use crate::spatial::planar_distance;
use chrono::Utc;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Change notification emitted on every registry mutation.
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    Added(Obstacle),
    Updated(Obstacle),
    Removed(ObstacleId),
    Cleared,
}

/// Insertion-ordered set of circular keep-out obstacles.
///
/// Insertion order is the tie-break when several obstacles collide with the
/// same scan segment: the first-inserted obstacle drives detour generation.
#[derive(Debug, Default)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
    next_id: u64,
    subscribers: Vec<Sender<RegistryEvent>>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an obstacle; always succeeds and appends to the ordered set.
    /// Negative radii are clamped to zero.
    pub fn add(&mut self, center: Waypoint, radius_m: f64, safe_distance_m: f64) -> ObstacleId {
        self.next_id += 1;
        let id = ObstacleId(self.next_id);
        let obstacle = Obstacle {
            id,
            lat: center.lat,
            lon: center.lon,
            radius_m: radius_m.max(0.0),
            safe_distance_m: safe_distance_m.max(0.0),
            created_at: Utc::now(),
        };
        tracing::info!(
            lat = obstacle.lat,
            lon = obstacle.lon,
            radius_m = obstacle.radius_m,
            safe_distance_m = obstacle.safe_distance_m,
            "obstacle added"
        );
        self.obstacles.push(obstacle.clone());
        self.emit(RegistryEvent::Added(obstacle));
        id
    }

    /// Remove an obstacle by handle. Returns false if the handle is unknown.
    pub fn remove(&mut self, id: ObstacleId) -> bool {
        let Some(index) = self.obstacles.iter().position(|o| o.id == id) else {
            return false;
        };
        let obstacle = self.obstacles.remove(index);
        tracing::info!(lat = obstacle.lat, lon = obstacle.lon, "obstacle removed");
        self.emit(RegistryEvent::Removed(id));
        true
    }

    /// Remove the obstacle nearest to `point`, if one lies within
    /// `threshold_m` planar meters. Returns the removed handle.
    ///
    /// The threshold is a hard cutoff: a nearest obstacle farther away than
    /// `threshold_m` is left in place and `None` is returned.
    pub fn remove_nearest(&mut self, point: Waypoint, threshold_m: f64) -> Option<ObstacleId> {
        let mut nearest: Option<(ObstacleId, f64)> = None;
        for obstacle in &self.obstacles {
            let distance_m = planar_distance(point, obstacle.center());
            // Strictly-less keeps the first-inserted obstacle on ties.
            if nearest.map_or(true, |(_, best)| distance_m < best) {
                nearest = Some((obstacle.id, distance_m));
            }
        }

        let (id, distance_m) = nearest?;
        if distance_m > threshold_m {
            return None;
        }
        self.remove(id);
        Some(id)
    }

    /// Apply an update to an existing obstacle. Returns false for unknown
    /// handles. Negative values are clamped to zero.
    pub fn update(&mut self, id: ObstacleId, request: UpdateObstacleRequest) -> bool {
        let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        if let Some(radius_m) = request.radius_m {
            obstacle.radius_m = radius_m.max(0.0);
        }
        if let Some(safe_distance_m) = request.safe_distance_m {
            obstacle.safe_distance_m = safe_distance_m.max(0.0);
        }
        let snapshot = obstacle.clone();
        tracing::info!(
            radius_m = snapshot.radius_m,
            safe_distance_m = snapshot.safe_distance_m,
            "obstacle updated"
        );
        self.emit(RegistryEvent::Updated(snapshot));
        true
    }

    /// Remove all obstacles.
    pub fn clear(&mut self) {
        self.obstacles.clear();
        tracing::info!("all obstacles cleared");
        self.emit(RegistryEvent::Cleared);
    }

    /// Read-only view in insertion order.
    pub fn list(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Subscribe to change notifications. The receiver sees every mutation
    /// made after the call; dropped receivers are pruned lazily.
    pub fn subscribe(&mut self) -> Receiver<RegistryEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: RegistryEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_nearest_at_same_point() {
        let mut registry = ObstacleRegistry::new();
        let center = Waypoint::new(33.6846, -117.8265);
        let id = registry.add(center, 5.0, 1.0);

        let removed = registry.remove_nearest(center, 50.0);
        assert_eq!(removed, Some(id));
        assert!(registry.list().is_empty());
    }

    #[test]
    fn remove_nearest_respects_threshold() {
        let mut registry = ObstacleRegistry::new();
        registry.add(Waypoint::new(33.0, -117.0), 5.0, 1.0);

        // ~1.1km away; a 50m click radius must not remove it.
        let far = Waypoint::new(33.01, -117.0);
        assert_eq!(registry.remove_nearest(far, 50.0), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_nearest_on_empty_registry() {
        let mut registry = ObstacleRegistry::new();
        assert_eq!(registry.remove_nearest(Waypoint::new(0.0, 0.0), 100.0), None);
    }

    #[test]
    fn remove_nearest_picks_minimum_distance() {
        let mut registry = ObstacleRegistry::new();
        let far_id = registry.add(Waypoint::new(33.001, -117.0), 5.0, 1.0);
        let near_id = registry.add(Waypoint::new(33.0001, -117.0), 5.0, 1.0);

        let removed = registry.remove_nearest(Waypoint::new(33.0, -117.0), 500.0);
        assert_eq!(removed, Some(near_id));
        assert!(registry.get(far_id).is_some());
    }

    #[test]
    fn remove_unknown_handle_is_false() {
        let mut registry = ObstacleRegistry::new();
        registry.add(Waypoint::new(33.0, -117.0), 5.0, 1.0);
        assert!(!registry.remove(ObstacleId(999)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn handles_stay_stable_across_removals() {
        let mut registry = ObstacleRegistry::new();
        let a = registry.add(Waypoint::new(33.0, -117.0), 5.0, 1.0);
        let b = registry.add(Waypoint::new(33.0, -117.0), 7.0, 1.0);
        assert_ne!(a, b);

        assert!(registry.remove(a));
        assert!(registry.get(b).is_some());
        let c = registry.add(Waypoint::new(34.0, -118.0), 5.0, 1.0);
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn update_changes_effective_radius() {
        let mut registry = ObstacleRegistry::new();
        let id = registry.add(Waypoint::new(33.0, -117.0), 5.0, 1.0);

        let ok = registry.update(
            id,
            UpdateObstacleRequest {
                radius_m: Some(8.0),
                safe_distance_m: None,
            },
        );
        assert!(ok);
        let obstacle = registry.get(id).unwrap();
        assert!((obstacle.effective_radius_m() - 9.0).abs() < 1e-12);

        assert!(!registry.update(ObstacleId(42), UpdateObstacleRequest::default()));
    }

    #[test]
    fn subscribers_see_mutations() {
        let mut registry = ObstacleRegistry::new();
        let events = registry.subscribe();

        let id = registry.add(Waypoint::new(33.0, -117.0), 5.0, 1.0);
        registry.update(
            id,
            UpdateObstacleRequest {
                radius_m: Some(6.0),
                safe_distance_m: None,
            },
        );
        registry.remove(id);
        registry.clear();

        let received: Vec<RegistryEvent> = events.try_iter().collect();
        assert_eq!(received.len(), 4);
        assert!(matches!(received[0], RegistryEvent::Added(_)));
        assert!(matches!(received[1], RegistryEvent::Updated(_)));
        assert!(matches!(received[2], RegistryEvent::Removed(removed) if removed == id));
        assert!(matches!(received[3], RegistryEvent::Cleared));
    }
}
