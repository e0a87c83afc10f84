mod detection;

pub use detection::{check_collision, collision_detection_system};
