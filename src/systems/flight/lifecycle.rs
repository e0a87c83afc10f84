use bevy::prelude::*;

use crate::components::{
    AutopilotController, CollisionComponent, CollisionEvent, PhysicsComponent, RigidBodyMut,
    SpatialComponent,
};
use crate::flight::FlightModel;
use crate::plugins::{AircraftCrashedEvent, AircraftResetEvent, ResetRequestEvent};

type AircraftQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut FlightModel,
        &'static mut PhysicsComponent,
        &'static mut SpatialComponent,
    ),
>;

/// Hand each collision to the flight model of the entity that collided.
pub fn collision_response_system(
    mut collisions: EventReader<CollisionEvent>,
    mut query: AircraftQuery,
    mut crashed: EventWriter<AircraftCrashedEvent>,
) {
    for event in collisions.read() {
        let Ok((mut model, mut physics, mut spatial)) = query.get_mut(event.entity) else {
            continue;
        };

        let mut body = RigidBodyMut::new(&mut physics, &mut spatial);
        if let Some(report) = model.on_collision(&mut body, &event.contacts) {
            crashed.send(AircraftCrashedEvent {
                entity: event.entity,
                point: report.point,
                impact_speed: report.impact_speed,
            });
        }
    }
}

/// Apply pending reset requests before anything else runs this step.
pub fn reset_request_system(
    mut requests: EventReader<ResetRequestEvent>,
    mut query: AircraftQuery,
    mut collisions: Query<&mut CollisionComponent>,
    mut autopilots: Query<&mut AutopilotController>,
    mut resets: EventWriter<AircraftResetEvent>,
) {
    for request in requests.read() {
        let Ok((mut model, mut physics, mut spatial)) = query.get_mut(request.entity) else {
            warn!("reset requested for {:?}, which has no flight model", request.entity);
            continue;
        };

        let mut body = RigidBodyMut::new(&mut physics, &mut spatial);
        model.reset(&mut body, request.position, request.rotation, request.speed);

        if let Ok(mut collision) = collisions.get_mut(request.entity) {
            collision.reset();
        }
        if let Ok(mut autopilot) = autopilots.get_mut(request.entity) {
            autopilot.reset();
        }

        resets.send(AircraftResetEvent {
            entity: request.entity,
        });
    }
}
