mod dynamics;
mod lifecycle;

pub use dynamics::flight_model_system;
pub use lifecycle::{collision_response_system, reset_request_system};
