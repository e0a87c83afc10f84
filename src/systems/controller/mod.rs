mod autopilot;

pub use autopilot::{autopilot_command, autopilot_system, AutopilotCommand};
