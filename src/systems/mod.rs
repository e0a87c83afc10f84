pub mod collisions;
pub mod controller;
mod flight;
pub mod physics;

pub use collisions::{check_collision, collision_detection_system};
pub use controller::{autopilot_command, autopilot_system, AutopilotCommand};
pub use flight::{collision_response_system, flight_model_system, reset_request_system};
pub use physics::{
    calculate_net_loads, force_calculator_system, integrate_state, physics_integrator_system,
};
