//! Flight dynamics core: forces, control law, derived metrics and the
//! alive/crashed lifecycle of a craft.

pub mod aero;
pub mod control_law;
mod lifecycle;
pub mod metrics;
mod model;
pub mod state;

pub use control_law::{steer, SteeringOutput};
pub use model::FlightModel;
pub use state::{CrashReport, FlightState, FlightTelemetry, GlideMetrics, LifeState};
