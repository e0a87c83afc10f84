pub mod errors;
pub mod math;

pub use errors::ConfigError;
pub use math::*;
