// Domain layer: core simulation types and rules.

pub mod ports;
pub mod state;
pub mod systems;
pub mod tuning;

pub use state::{
    CameraPosition, ControlMode, Direction, DriveIntent, PoseDelta, Transform, VehicleSnapshot,
};
