pub mod autopilot;
pub mod flight;
pub mod loader;
pub mod physics;

pub use autopilot::AutopilotConfig;
pub use flight::{
    DragConfig, FlightModelConfig, LiftConfig, LimitsConfig, SteeringConfig, ThrustConfig,
};
pub use physics::PhysicsConfig;
