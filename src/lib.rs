//! Arcade-realistic flight dynamics for drones and light aircraft, hosted on
//! a small fixed-step rigid body integrator inside bevy.

pub mod components;
pub mod config;
pub mod flight;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;
