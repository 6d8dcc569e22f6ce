// Use-case level inputs/outputs for the session loop.

use crate::domain::{CameraPosition, VehicleSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Running,
    Finished { ticks: u64 },
}

#[derive(Debug, Clone)]
pub struct WorldUpdate {
    pub tick: u64,
    pub vehicles: Vec<VehicleSnapshot>,
    pub camera: Option<CameraPosition>,
}

impl WorldUpdate {
    pub fn vehicle(&self, name: &str) -> Option<&VehicleSnapshot> {
        self.vehicles.iter().find(|v| v.name == name)
    }
}
