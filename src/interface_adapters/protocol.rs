// Serializable snapshot format for world updates.

use crate::domain::{CameraPosition, VehicleSnapshot};
use crate::use_cases::WorldUpdate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WorldUpdateMessage {
    pub tick: u64,
    pub vehicles: Vec<VehicleMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleMessage {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub speed: f32,
    pub damaged: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub damaged_parts: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CameraMessage {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<&VehicleSnapshot> for VehicleMessage {
    fn from(v: &VehicleSnapshot) -> Self {
        Self {
            name: v.name.clone(),
            x: v.x,
            y: v.y,
            heading: v.heading,
            speed: v.speed,
            damaged: v.damaged,
            damaged_parts: v.damaged_parts.clone(),
        }
    }
}

impl From<CameraPosition> for CameraMessage {
    fn from(c: CameraPosition) -> Self {
        Self {
            x: c.x,
            y: c.y,
            z: c.z,
        }
    }
}

impl From<&WorldUpdate> for WorldUpdateMessage {
    fn from(update: &WorldUpdate) -> Self {
        Self {
            tick: update.tick,
            vehicles: update.vehicles.iter().map(VehicleMessage::from).collect(),
            camera: update.camera.map(CameraMessage::from),
        }
    }
}

/// Encodes a world update as a single JSON line.
pub fn encode_update(update: &WorldUpdate) -> Result<String, serde_json::Error> {
    serde_json::to_string(&WorldUpdateMessage::from(update))
}
