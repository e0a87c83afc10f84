use bevy::prelude::{debug, info, trace, warn, Component};
use nalgebra::{UnitQuaternion, Vector3};
use std::collections::HashSet;

use crate::components::{ColliderId, ForceMode, RigidBody};
use crate::config::FlightModelConfig;
use crate::flight::aero::{angular_drag, parasitic_drag, surface_force, Surface, SurfaceForce};
use crate::flight::control_law::steer;
use crate::flight::metrics::{angle_of_attack, glide_metrics, load_factor, GForceEstimator};
use crate::flight::state::{FlightState, FlightTelemetry, GlideMetrics, LifeState};
use crate::utils::{clamp_magnitude, deg_to_rad, is_finite_vec, move_to, ConfigError};

/// Flight dynamics of one craft.
///
/// Turns throttle and attitude commands into forces and torques on a
/// [`RigidBody`] once per fixed step, and keeps the derived flight state that
/// controllers, agents and the HUD poll afterwards.
#[derive(Component, Debug, Clone)]
pub struct FlightModel {
    config: FlightModelConfig,
    landing_gear: HashSet<ColliderId>,
    pub(crate) life: LifeState,

    pub(crate) throttle_input: f64,
    pub(crate) control_input: Vector3<f64>,
    pub(crate) throttle: f64,
    pub(crate) effective_input: Vector3<f64>,

    pub(crate) state: FlightState,
    pub(crate) g_force: GForceEstimator,
    load_factor: f64,
    glide: GlideMetrics,
    /// Wing lift applied during the last step, world frame [N]
    pub(crate) last_lift: Vector3<f64>,
    /// Total drag applied during the last step, world frame [N]
    pub(crate) last_drag: Vector3<f64>,
    /// Whether `last_lift` holds a wing sample; stall is not reported until it does
    pub(crate) lift_sampled: bool,
}

impl FlightModel {
    pub fn new(config: FlightModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let landing_gear = config.landing_gear.iter().copied().collect();
        Ok(Self {
            config,
            landing_gear,
            life: LifeState::Alive,
            throttle_input: 0.0,
            control_input: Vector3::zeros(),
            throttle: 0.0,
            effective_input: Vector3::zeros(),
            state: FlightState::default(),
            g_force: GForceEstimator::new(Vector3::zeros()),
            load_factor: 1.0,
            glide: GlideMetrics::default(),
            last_lift: Vector3::zeros(),
            last_drag: Vector3::zeros(),
            lift_sampled: false,
        })
    }

    /// Launch the body forward at the configured initial speed.
    pub fn start<B: RigidBody + ?Sized>(&mut self, body: &mut B) {
        let velocity = body.rotation() * Vector3::new(0.0, 0.0, self.config.initial_speed);
        body.set_linear_velocity(velocity);
        self.lift_sampled = false;
        self.g_force.reset(velocity);
        self.observe(body);
        info!(
            "{} launched at {:.1} m/s from {:?}",
            self.config.name,
            self.config.initial_speed,
            body.position()
        );
    }

    pub fn set_throttle_input(&mut self, input: f64) {
        if self.is_crashed() {
            return;
        }
        if !input.is_finite() {
            debug!("{}: ignoring non-finite throttle input {}", self.config.name, input);
            return;
        }
        self.throttle_input = input.clamp(-1.0, 1.0);
    }

    /// Pitch/yaw/roll command; scaled down to unit length when longer.
    pub fn set_control_input(&mut self, input: Vector3<f64>) {
        if self.is_crashed() {
            return;
        }
        if !is_finite_vec(&input) {
            debug!("{}: ignoring non-finite control input {:?}", self.config.name, input);
            return;
        }
        self.control_input = clamp_magnitude(&input, 1.0);
    }

    /// Advance the model by one fixed step.
    ///
    /// Queues this step's forces and torques on the body; the host integrates
    /// them afterwards. A non-positive or non-finite `dt` only refreshes the
    /// observed state.
    pub fn fixed_step_update<B: RigidBody + ?Sized>(&mut self, body: &mut B, dt: f64) {
        self.observe(body);
        self.g_force.update(
            self.state.world_velocity,
            &body.rotation(),
            dt,
            self.is_crashed(),
            &self.config.limits,
        );

        if !(dt.is_finite() && dt > 0.0) {
            debug!("{}: skipping flight step with dt = {}", self.config.name, dt);
            return;
        }

        trace!(
            "{}: speed {:.1} m/s, aoa {:.1} deg, throttle {:.2}",
            self.config.name,
            self.state.airspeed(),
            self.state.angle_of_attack.to_degrees(),
            self.throttle
        );

        self.update_throttle(dt);

        if self.is_alive() {
            self.apply_thrust(body);
            self.apply_lift(body);
            self.apply_steering(body, dt);
        } else {
            self.align_with_velocity(body);
        }

        self.apply_drag(body);
        self.apply_angular_drag(body);

        self.observe(body);
    }

    /// Refresh the observed state from the body.
    ///
    /// The body velocity is clamped to the configured maximum speed and
    /// written back when it exceeds it.
    pub(crate) fn observe<B: RigidBody + ?Sized>(&mut self, body: &mut B) {
        let limits = &self.config.limits;
        let rotation = body.rotation();

        let mut velocity = body.linear_velocity();
        if !is_finite_vec(&velocity) {
            warn!("{}: body reported non-finite velocity, zeroing", self.config.name);
            velocity = Vector3::zeros();
            body.set_linear_velocity(velocity);
        }
        let clamped = clamp_magnitude(&velocity, limits.max_speed);
        if clamped != velocity {
            body.set_linear_velocity(clamped);
        }

        let mut angular_velocity = body.angular_velocity();
        if !is_finite_vec(&angular_velocity) {
            warn!("{}: body reported non-finite angular velocity, zeroing", self.config.name);
            angular_velocity = Vector3::zeros();
            body.set_angular_velocity(angular_velocity);
        }

        let local_velocity = rotation.inverse_transform_vector(&clamped);
        let local_angular_velocity = rotation.inverse_transform_vector(&angular_velocity);
        let (aoa, aoa_yaw) = angle_of_attack(&local_velocity);

        self.state = FlightState {
            world_velocity: clamped,
            world_angular_velocity: angular_velocity,
            local_velocity,
            local_angular_velocity,
            angle_of_attack: aoa,
            angle_of_attack_yaw: aoa_yaw,
        };
        self.load_factor = load_factor(&local_angular_velocity, clamped.norm(), limits.gravity);
        self.glide = glide_metrics(
            &clamped,
            &rotation,
            &self.last_lift,
            &self.last_drag,
            body.mass(),
            limits,
        );
        if !self.lift_sampled {
            self.glide.stalled = false;
        }
    }

    fn update_throttle(&mut self, dt: f64) {
        let target = if self.throttle_input > 0.0 { 1.0 } else { 0.0 };
        let speed = self.config.thrust.throttle_speed * self.throttle_input.abs();
        self.throttle = move_to(self.throttle, target, speed, dt, 0.0, 1.0);
    }

    fn apply_thrust<B: RigidBody + ?Sized>(&self, body: &mut B) {
        let thrust = &self.config.thrust;
        let magnitude = (self.throttle * thrust.max_thrust).clamp(0.0, thrust.thrust_ceiling);
        body.add_relative_force(Vector3::z() * magnitude, ForceMode::Force);
    }

    fn apply_lift<B: RigidBody + ?Sized>(&mut self, body: &mut B) {
        let (wing, rudder) = self.surface_forces();

        body.add_relative_force(wing.total(), ForceMode::Force);
        body.add_relative_force(rudder.total(), ForceMode::Force);

        let rotation = body.rotation();
        self.last_lift = rotation * wing.lift;
        self.last_drag = rotation * (wing.induced_drag + rudder.induced_drag);
        self.lift_sampled = true;
    }

    fn surface_forces(&self) -> (SurfaceForce, SurfaceForce) {
        let lift = &self.config.lift;
        let local_velocity = &self.state.local_velocity;

        let wing = surface_force(
            local_velocity,
            self.state.angle_of_attack,
            &Surface {
                span_axis: Vector3::x(),
                power: lift.lift_power,
                aoa_curve: &lift.lift_aoa,
                induced_drag: lift.induced_drag,
                induced_drag_curve: &lift.induced_drag_curve,
            },
        )
        .clamped(lift.lift_ceiling);

        let rudder = surface_force(
            local_velocity,
            self.state.angle_of_attack_yaw,
            &Surface {
                span_axis: Vector3::y(),
                power: lift.rudder_power,
                aoa_curve: &lift.rudder_aoa,
                induced_drag: lift.induced_drag,
                induced_drag_curve: &lift.rudder_induced_drag_curve,
            },
        )
        .clamped(lift.rudder_ceiling);

        (wing, rudder)
    }

    fn apply_steering<B: RigidBody + ?Sized>(&mut self, body: &mut B, dt: f64) {
        let output = steer(
            &self.control_input,
            &self.state.local_angular_velocity,
            self.state.forward_speed(),
            self.state.angle_of_attack_yaw,
            dt,
            &self.config.steering,
        );

        body.add_relative_torque(output.correction.map(deg_to_rad), ForceMode::VelocityChange);
        self.effective_input = output.effective_input;
    }

    fn apply_drag<B: RigidBody + ?Sized>(&mut self, body: &mut B) {
        let drag = &self.config.drag;
        let force = parasitic_drag(&self.state.local_velocity, &drag.table, drag.drag_ceiling);
        body.add_relative_force(force, ForceMode::Force);
        self.last_drag += body.rotation() * force;
    }

    fn apply_angular_drag<B: RigidBody + ?Sized>(&self, body: &mut B) {
        let damping = angular_drag(
            &self.state.local_angular_velocity,
            &self.config.drag.angular_drag,
        );
        body.add_relative_torque(damping, ForceMode::Acceleration);
    }

    /// A wreck that still moves keeps its nose along the velocity.
    fn align_with_velocity<B: RigidBody + ?Sized>(&mut self, body: &mut B) {
        self.last_lift = Vector3::zeros();
        self.last_drag = Vector3::zeros();
        self.lift_sampled = false;

        let forward = match self.state.world_velocity.try_normalize(1e-3) {
            Some(forward) => forward,
            None => return,
        };
        let up = body.rotation() * Vector3::y();
        if forward.cross(&up).norm_squared() < 1e-9 {
            return;
        }
        body.set_rotation(UnitQuaternion::face_towards(&forward, &up));
    }

    pub fn config(&self) -> &FlightModelConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn is_landing_gear(&self, collider: ColliderId) -> bool {
        self.landing_gear.contains(&collider)
    }

    pub fn life_state(&self) -> LifeState {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn is_crashed(&self) -> bool {
        self.life == LifeState::Crashed
    }

    pub fn throttle_input(&self) -> f64 {
        self.throttle_input
    }

    pub fn control_input(&self) -> Vector3<f64> {
        self.control_input
    }

    /// Engine setting in [0, 1]
    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn effective_input(&self) -> Vector3<f64> {
        self.effective_input
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn local_g_force(&self) -> Vector3<f64> {
        self.g_force.local_g_force()
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    pub fn glide(&self) -> &GlideMetrics {
        &self.glide
    }

    pub fn last_lift(&self) -> Vector3<f64> {
        self.last_lift
    }

    pub fn last_drag(&self) -> Vector3<f64> {
        self.last_drag
    }

    pub fn telemetry(&self) -> FlightTelemetry {
        FlightTelemetry {
            alive: self.is_alive(),
            throttle: self.throttle,
            effective_input: self.effective_input,
            world_velocity: self.state.world_velocity,
            local_velocity: self.state.local_velocity,
            local_angular_velocity: self.state.local_angular_velocity,
            local_g_force: self.local_g_force(),
            angle_of_attack: self.state.angle_of_attack,
            angle_of_attack_yaw: self.state.angle_of_attack_yaw,
            load_factor: self.load_factor,
            glide: self.glide,
        }
    }
}
