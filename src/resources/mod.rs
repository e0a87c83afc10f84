mod ground;

pub use ground::{GroundPlane, GroundProbe};
