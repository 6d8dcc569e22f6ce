// Domain-level simulation types: intents, poses and snapshots.

use serde::Deserialize;

/// Which input device drives a vehicle. Chosen once per vehicle at scene load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    #[default]
    Keyboard,
    Touch,
}

/// Longitudinal direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Per-tick control intents resolved from an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriveIntent {
    pub accelerate: bool,
    pub reverse: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl DriveIntent {
    /// +1 for left, -1 for right, 0 when neither or both are held.
    pub fn steer_sign(&self) -> f32 {
        match (self.steer_left, self.steer_right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Change to apply to a vehicle transform for one tick.
///
/// Rotation is applied first, then the translation along the rotated local up
/// axis. A negative `forward` moves the vehicle backwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseDelta {
    /// Heading change in degrees, counter-clockwise positive.
    pub rotation: f32,
    /// Distance along the local up axis.
    pub forward: f32,
}

/// 2D pose of a vehicle. Heading 0 faces +Y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    /// Degrees, counter-clockwise positive.
    pub heading: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self { x, y, heading }
    }

    pub fn apply(&mut self, delta: PoseDelta) {
        self.heading = (self.heading + delta.rotation).rem_euclid(360.0);

        // Local up axis after rotating counter-clockwise from +Y.
        let rad = self.heading.to_radians();
        self.x += -rad.sin() * delta.forward;
        self.y += rad.cos() * delta.forward;
    }

    /// World position of a point given in the vehicle's local frame
    /// (`right` along local +X, `up` along the facing direction).
    pub fn local_to_world(&self, right: f32, up: f32) -> (f32, f32) {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        (
            self.x + cos * right - sin * up,
            self.y + sin * right + cos * up,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone)]
pub struct VehicleSnapshot {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub speed: f32,
    pub damaged: bool,
    pub damaged_parts: Vec<String>,
}
