// Gameplay tuning, kept apart from runtime configuration.

pub mod camera;
pub mod damage;
pub mod vehicle;
