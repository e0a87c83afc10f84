use bevy::prelude::{info, warn};
use nalgebra::{UnitQuaternion, Vector3};

use crate::components::{Contact, RigidBody};
use crate::flight::model::FlightModel;
use crate::flight::state::{CrashReport, LifeState};
use crate::utils::{is_finite_vec, yaw_only};

impl FlightModel {
    /// Handle the contacts the host reported for this step.
    ///
    /// The first contact on a collider that is not landing gear destroys the
    /// craft: inputs are cut, the body is frozen at the contact point with
    /// only its heading kept, and a [`CrashReport`] is returned. Contacts are
    /// ignored while already crashed.
    pub fn on_collision<B: RigidBody + ?Sized>(
        &mut self,
        body: &mut B,
        contacts: &[Contact],
    ) -> Option<CrashReport> {
        if self.is_crashed() {
            return None;
        }

        let contact = contacts.iter().find(|contact| {
            !self.is_landing_gear(contact.collider) && is_finite_vec(&contact.point)
        })?;
        let impact_speed = body.linear_velocity().norm();

        self.die();

        body.set_kinematic(true);
        body.set_linear_velocity(Vector3::zeros());
        body.set_angular_velocity(Vector3::zeros());
        body.set_position(contact.point);
        body.set_rotation(yaw_only(&body.rotation()));

        self.g_force.reset(Vector3::zeros());
        self.observe(body);

        info!(
            "{} crashed at {:?} ({:.1} m/s, collider {:?})",
            self.name(),
            contact.point,
            impact_speed,
            contact.collider
        );

        Some(CrashReport {
            point: contact.point,
            impact_speed,
        })
    }

    fn die(&mut self) {
        self.life = LifeState::Crashed;
        self.clear_inputs();
    }

    fn clear_inputs(&mut self) {
        self.throttle_input = 0.0;
        self.throttle = 0.0;
        self.control_input = Vector3::zeros();
        self.effective_input = Vector3::zeros();
        self.last_lift = Vector3::zeros();
        self.last_drag = Vector3::zeros();
        self.lift_sampled = false;
    }

    /// Put the craft back in the air at the given pose, flying forward at
    /// `forward_speed`. Calling it twice with the same arguments leaves the
    /// same state.
    pub fn reset<B: RigidBody + ?Sized>(
        &mut self,
        body: &mut B,
        position: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        forward_speed: f64,
    ) {
        let forward_speed = if forward_speed.is_finite() {
            forward_speed
        } else {
            warn!("{}: non-finite reset speed {}, resetting at rest", self.name(), forward_speed);
            0.0
        };

        let velocity = rotation * Vector3::new(0.0, 0.0, forward_speed);

        body.set_kinematic(false);
        body.set_position(position);
        body.set_rotation(rotation);
        body.set_linear_velocity(velocity);
        body.set_angular_velocity(Vector3::zeros());

        self.life = LifeState::Alive;
        self.clear_inputs();
        self.g_force.reset(velocity);
        self.observe(body);

        info!("{} reset at {:?} with {:.1} m/s", self.name(), position, forward_speed);
    }
}
