use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Identifier of a collider attached to a craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// One contact point reported by the physics host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Collider on the craft that touched something
    pub collider: ColliderId,
    /// Point of contact in world space [m]
    pub point: Vector3<f64>,
    /// Surface normal at the contact point
    pub normal: Vector3<f64>,
    /// Penetration depth [m]
    pub penetration_depth: f64,
}

impl Contact {
    pub fn new(collider: ColliderId, point: Vector3<f64>) -> Self {
        Self {
            collider,
            point,
            normal: Vector3::y(),
            penetration_depth: 0.0,
        }
    }
}

/// A contact list for one craft, raised once per physics step in which the
/// craft touches something.
#[derive(Event, Debug, Clone)]
pub struct CollisionEvent {
    /// Entity that collided
    pub entity: Entity,
    pub contacts: Vec<Contact>,
}

/// A collider probe point on the airframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderPoint {
    pub id: ColliderId,
    /// Offset from the centre of mass in the body frame [m]
    pub offset: Vector3<f64>,
}

/// Collider probe points checked against the ground each step.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionComponent {
    pub points: Vec<ColliderPoint>,
    /// Whether the craft touched anything during the last step
    #[serde(skip)]
    pub has_collided: bool,
    /// Contacts raised since the last reset
    #[serde(skip)]
    pub collision_count: u32,
}

impl CollisionComponent {
    pub fn new(points: Vec<ColliderPoint>) -> Self {
        Self {
            points,
            has_collided: false,
            collision_count: 0,
        }
    }

    /// Three wheels under the wings and nose plus nose, tail and wingtip
    /// airframe points, sized for a craft of the given half span [m].
    pub fn tricycle(half_span: f64, gear_height: f64) -> Self {
        let length = half_span * 0.8;
        Self::new(vec![
            ColliderPoint {
                id: ColliderId(0),
                offset: Vector3::new(0.0, -gear_height, length * 0.5),
            },
            ColliderPoint {
                id: ColliderId(1),
                offset: Vector3::new(-half_span * 0.3, -gear_height, -length * 0.1),
            },
            ColliderPoint {
                id: ColliderId(2),
                offset: Vector3::new(half_span * 0.3, -gear_height, -length * 0.1),
            },
            ColliderPoint {
                id: ColliderId(10),
                offset: Vector3::new(0.0, 0.0, length),
            },
            ColliderPoint {
                id: ColliderId(11),
                offset: Vector3::new(0.0, 0.2, -length),
            },
            ColliderPoint {
                id: ColliderId(12),
                offset: Vector3::new(-half_span, 0.0, 0.0),
            },
            ColliderPoint {
                id: ColliderId(13),
                offset: Vector3::new(half_span, 0.0, 0.0),
            },
        ])
    }

    /// Gear collider ids of [`CollisionComponent::tricycle`]
    pub fn tricycle_gear() -> Vec<ColliderId> {
        vec![ColliderId(0), ColliderId(1), ColliderId(2)]
    }

    pub fn reset(&mut self) {
        self.has_collided = false;
        self.collision_count = 0;
    }

    pub fn register_collision(&mut self) {
        self.has_collided = true;
        self.collision_count += 1;
    }
}
