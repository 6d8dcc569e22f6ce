// Per-tick simulation rules.

pub mod camera;
pub mod damage;
pub mod vehicle_motion;
