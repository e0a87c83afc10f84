use bevy::prelude::*;
use nalgebra::Vector3;

use crate::{
    components::{CollisionComponent, CollisionEvent, Contact, PhysicsComponent, SpatialComponent},
    flight::FlightModel,
    resources::{GroundPlane, GroundProbe},
};

/// Test every collider point of every dynamic body against the ground and
/// raise one [`CollisionEvent`] per body that touches it.
///
/// Bodies touching only with landing gear are pushed back out of the ground
/// and lose their sink rate, so a craft can sit and roll on its wheels.
pub fn collision_detection_system(
    mut query: Query<(
        Entity,
        &PhysicsComponent,
        &mut SpatialComponent,
        &mut CollisionComponent,
        Option<&FlightModel>,
    )>,
    ground: Res<GroundPlane>,
    mut collision_events: EventWriter<CollisionEvent>,
) {
    for (entity, physics, mut spatial, mut collision, model) in query.iter_mut() {
        collision.has_collided = false;
        if physics.kinematic {
            continue;
        }

        let contacts = check_collision(&spatial, &collision, &*ground);
        if contacts.is_empty() {
            continue;
        }

        let is_gear =
            |contact: &Contact| model.is_some_and(|m| m.is_landing_gear(contact.collider));
        if contacts.iter().all(is_gear) {
            resolve_gear_contact(&mut spatial, &contacts);
        }

        collision.register_collision();
        collision_events.send(CollisionEvent { entity, contacts });
    }
}

/// Contacts of the collider points that are at or below the ground.
pub fn check_collision(
    spatial: &SpatialComponent,
    collision: &CollisionComponent,
    ground: &impl GroundProbe,
) -> Vec<Contact> {
    collision
        .points
        .iter()
        .filter_map(|point| {
            let world = spatial.position + spatial.attitude * point.offset;
            let height = ground.height_at(&world);
            let penetration = height - world.y;
            (penetration >= 0.0).then(|| Contact {
                collider: point.id,
                point: Vector3::new(world.x, height, world.z),
                normal: Vector3::y(),
                penetration_depth: penetration,
            })
        })
        .collect()
}

fn resolve_gear_contact(spatial: &mut SpatialComponent, contacts: &[Contact]) {
    let depth = contacts
        .iter()
        .map(|contact| contact.penetration_depth)
        .fold(0.0, f64::max);
    spatial.position.y += depth;
    if spatial.velocity.y < 0.0 {
        spatial.velocity.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ColliderId, ColliderPoint};
    use approx::assert_relative_eq;

    fn skids() -> CollisionComponent {
        CollisionComponent::new(vec![
            ColliderPoint {
                id: ColliderId(0),
                offset: Vector3::new(0.0, -0.5, 0.0),
            },
            ColliderPoint {
                id: ColliderId(10),
                offset: Vector3::new(0.0, 0.0, 1.0),
            },
        ])
    }

    #[test]
    fn test_contacts_below_ground() {
        let ground = GroundPlane::new(2.0);
        let spatial = SpatialComponent::at_position(Vector3::new(4.0, 2.2, -1.0));

        let contacts = check_collision(&spatial, &skids(), &ground);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].collider, ColliderId(0));
        assert_relative_eq!(contacts[0].penetration_depth, 0.3, epsilon = 1e-12);
        assert_relative_eq!(contacts[0].point, Vector3::new(4.0, 2.0, -1.0));
    }

    #[test]
    fn test_no_contacts_in_the_air() {
        let spatial = SpatialComponent::at_position(Vector3::new(0.0, 10.0, 0.0));
        assert!(check_collision(&spatial, &skids(), &GroundPlane::default()).is_empty());
    }

    #[test]
    fn test_gear_contact_is_resolved() {
        let mut spatial = SpatialComponent::at_position(Vector3::new(0.0, 0.3, 0.0));
        spatial.velocity = Vector3::new(0.0, -2.0, 10.0);
        let contacts = check_collision(&spatial, &skids(), &GroundPlane::default());

        resolve_gear_contact(&mut spatial, &contacts);

        assert_relative_eq!(spatial.position.y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(spatial.velocity, Vector3::new(0.0, 0.0, 10.0));
    }
}
