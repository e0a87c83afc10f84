use bevy::prelude::*;

use crate::components::CollisionEvent;
use crate::plugins::{
    AircraftCrashedEvent, AircraftResetEvent, PhysicsPlugin, PhysicsSet, ResetRequestEvent,
};
use crate::resources::GroundPlane;
use crate::systems::{
    autopilot_system, collision_detection_system, collision_response_system, flight_model_system,
    reset_request_system,
};

/// Order of the flight systems inside `FixedUpdate`.
///
/// Resets land first so a reset craft flies the same step; contacts are
/// detected after integration and answered before the next step begins.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FlightSet {
    Reset,
    Control,
    Dynamics,
    Contacts,
    Collision,
}

/// Flight models, autopilots and ground contacts on top of [`PhysicsPlugin`].
pub struct FlightPlugin;

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin::default());
        }

        app.add_event::<CollisionEvent>()
            .add_event::<ResetRequestEvent>()
            .add_event::<AircraftCrashedEvent>()
            .add_event::<AircraftResetEvent>()
            .init_resource::<GroundPlane>();

        app.configure_sets(
            FixedUpdate,
            (FlightSet::Reset, FlightSet::Control, FlightSet::Dynamics)
                .chain()
                .before(PhysicsSet::ForceCalculation),
        );
        app.configure_sets(
            FixedUpdate,
            (FlightSet::Contacts, FlightSet::Collision)
                .chain()
                .after(PhysicsSet::Integration),
        );

        app.add_systems(
            FixedUpdate,
            (
                reset_request_system.in_set(FlightSet::Reset),
                autopilot_system.in_set(FlightSet::Control),
                flight_model_system.in_set(FlightSet::Dynamics),
                collision_detection_system.in_set(FlightSet::Contacts),
                collision_response_system.in_set(FlightSet::Collision),
            ),
        );

        info!("Flight plugin ready");
    }
}
