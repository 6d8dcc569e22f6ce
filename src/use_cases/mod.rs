// Use cases layer: application workflows for the simulation.

pub mod drive;
pub mod session;
pub mod types;

pub use session::{Obstacle, Session, Vehicle, VehiclePart, VehicleSetup};
pub use types::{SessionState, WorldUpdate};
