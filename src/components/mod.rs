pub mod collision;
pub mod controller;
pub mod curve;
pub mod drag_table;
pub mod physics;
pub mod rigid_body;
pub mod spatial;

pub use collision::{ColliderId, ColliderPoint, CollisionComponent, CollisionEvent, Contact};
pub use controller::{AutopilotController, AutopilotMode};
pub use curve::{CoefficientCurve, CurveKey};
pub use drag_table::{AxisDirection, DragTable};
pub use physics::{Force, ForceMode, Moment, NetLoads, PhysicsComponent, ReferenceFrame};
pub use rigid_body::{RigidBody, RigidBodyMut};
pub use spatial::SpatialComponent;
