use crate::domain::state::CameraPosition;
use crate::domain::tuning::camera::CameraTuning;

/// Keeps the camera at a fixed offset from a target position.
#[derive(Debug, Clone)]
pub struct CameraFollow {
    pub target: String,
    pub tuning: CameraTuning,
}

impl CameraFollow {
    pub fn new(target: impl Into<String>, tuning: CameraTuning) -> Self {
        Self {
            target: target.into(),
            tuning,
        }
    }

    pub fn follow(&self, target_x: f32, target_y: f32) -> CameraPosition {
        CameraPosition {
            x: target_x + self.tuning.offset_x,
            y: target_y + self.tuning.offset_y,
            z: self.tuning.depth,
        }
    }
}
