mod aircraft;
mod events;
mod flight;
mod physics;

pub use aircraft::AircraftBundle;
pub use events::{AircraftCrashedEvent, AircraftResetEvent, ResetRequestEvent};
pub use flight::{FlightPlugin, FlightSet};
pub use physics::{PhysicsPlugin, PhysicsSet};
