use bevy::prelude::*;
use nalgebra::Vector3;

use crate::config::AutopilotConfig;

/// What the autopilot is doing this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutopilotMode {
    #[default]
    Patrol,
    AvoidGround,
    RecoverSpeed,
}

/// Scripted pilot flying a craft toward a patrol point.
#[derive(Component, Debug, Clone)]
pub struct AutopilotController {
    pub config: AutopilotConfig,
    pub active: bool,
    pub(crate) patrol_point: Option<Vector3<f64>>,
    pub(crate) last_input: Vector3<f64>,
    pub(crate) recovering_speed: bool,
    pub(crate) mode: AutopilotMode,
}

impl AutopilotController {
    pub fn new(config: AutopilotConfig) -> Self {
        let patrol_point = config.patrol_point;
        Self {
            config,
            active: true,
            patrol_point,
            last_input: Vector3::zeros(),
            recovering_speed: false,
            mode: AutopilotMode::Patrol,
        }
    }

    pub fn enable(&mut self) {
        self.active = true;
    }

    pub fn disable(&mut self) {
        self.active = false;
    }

    pub fn mode(&self) -> AutopilotMode {
        self.mode
    }

    pub fn patrol_point(&self) -> Option<Vector3<f64>> {
        self.patrol_point
    }

    /// Forget the smoothed command and the recovery latch; the patrol point
    /// is kept.
    pub fn reset(&mut self) {
        self.last_input = Vector3::zeros();
        self.recovering_speed = false;
        self.mode = AutopilotMode::Patrol;
    }
}

impl Default for AutopilotController {
    fn default() -> Self {
        Self::new(AutopilotConfig::default())
    }
}
