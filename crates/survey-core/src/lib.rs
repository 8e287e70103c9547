pub mod collision;
pub mod detour;
pub mod mission;
pub mod models;
pub mod registry;
pub mod route;
pub mod segment;
pub mod spatial;

pub use collision::{colliding_obstacles, segment_collides};
pub use detour::{line_circle_intersections, plan_detour};
pub use mission::{MissionError, MissionPlan, ObstacleSpec};
pub use models::{
    LabeledSegment, Obstacle, ObstacleId, SegmentKind, UpdateObstacleRequest, Waypoint,
};
pub use registry::{ObstacleRegistry, RegistryEvent};
pub use route::route;
pub use segment::identify_segments;
pub use spatial::{planar_distance, point_in_polygon, LocalFrame, EARTH_RADIUS_M};
