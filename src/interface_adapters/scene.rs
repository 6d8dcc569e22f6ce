// TOML scene description: vehicles, their damageable parts, scenery and camera.

use super::input::{ScriptSegment, ScriptedInput};
use crate::domain::ports::{ContactSource, DamageRenderer};
use crate::domain::systems::camera::CameraFollow;
use crate::domain::systems::damage::{DamageProfile, Damageable};
use crate::domain::tuning::camera::CameraTuning;
use crate::domain::tuning::vehicle::VehicleTuning;
use crate::domain::{ControlMode, Transform};
use crate::use_cases::{Obstacle, Session, VehiclePart, VehicleSetup};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum SceneError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    NoVehicles,
    DuplicateName(String),
    InvalidValue { entity: String, field: &'static str },
    UnknownCameraTarget(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io { path, source } => {
                write!(f, "failed to read scene {}: {source}", path.display())
            }
            SceneError::Parse(e) => write!(f, "invalid scene file: {e}"),
            SceneError::NoVehicles => write!(f, "scene defines no vehicles"),
            SceneError::DuplicateName(name) => write!(f, "name `{name}` is used more than once"),
            SceneError::InvalidValue { entity, field } => {
                write!(f, "`{entity}` has an invalid `{field}`")
            }
            SceneError::UnknownCameraTarget(target) => {
                write!(f, "camera target `{target}` is not a vehicle")
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io { source, .. } => Some(source),
            SceneError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SceneError {
    fn from(e: toml::de::Error) -> Self {
        SceneError::Parse(e)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    camera: Option<CameraEntry>,
    #[serde(default)]
    vehicles: Vec<VehicleEntry>,
    #[serde(default)]
    obstacles: Vec<ObstacleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct VehicleEntry {
    name: String,
    #[serde(default)]
    control_mode: ControlMode,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    heading: f32,
    #[serde(default = "default_radius")]
    radius: f32,
    #[serde(default = "default_max_speed")]
    max_speed: f32,
    #[serde(default = "default_max_steer_rate")]
    max_steer_rate: f32,
    #[serde(default = "default_brake_strength")]
    brake_strength: f32,
    #[serde(default)]
    parts: Vec<PartEntry>,
    #[serde(default)]
    script: Vec<ScriptSegment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartEntry {
    name: String,
    /// Collider centre in the vehicle's local frame; +y is the nose.
    #[serde(default)]
    offset_x: f32,
    #[serde(default)]
    offset_y: f32,
    #[serde(default = "default_part_radius")]
    radius: f32,
    /// Sub-objects switched off when this part is damaged.
    #[serde(default)]
    disable: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObstacleEntry {
    name: String,
    x: f32,
    y: f32,
    radius: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraEntry {
    target: String,
    #[serde(default)]
    offset_x: f32,
    #[serde(default)]
    offset_y: f32,
    #[serde(default = "default_depth")]
    depth: f32,
}

fn default_radius() -> f32 {
    0.5
}

fn default_part_radius() -> f32 {
    0.25
}

fn default_max_speed() -> f32 {
    VehicleTuning::default().max_speed
}

fn default_max_steer_rate() -> f32 {
    VehicleTuning::default().max_steer
}

fn default_brake_strength() -> f32 {
    VehicleTuning::default().brake_strength
}

fn default_depth() -> f32 {
    CameraTuning::default().depth
}

/// A parsed and validated scene.
#[derive(Debug, Clone)]
pub struct Scene {
    file: SceneFile,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SceneError> {
        let file: SceneFile = toml::from_str(text)?;
        validate(&file)?;
        Ok(Self { file })
    }

    pub fn vehicle_setups(&self) -> Vec<VehicleSetup> {
        self.file
            .vehicles
            .iter()
            .map(|v| VehicleSetup {
                name: v.name.clone(),
                control_mode: v.control_mode,
                transform: Transform::new(v.x, v.y, v.heading),
                tuning: VehicleTuning {
                    max_speed: v.max_speed,
                    max_steer: v.max_steer_rate,
                    brake_strength: v.brake_strength,
                },
                radius: v.radius,
                parts: v.parts.iter().map(vehicle_part).collect(),
                input: Box::new(ScriptedInput::new(v.control_mode, v.script.clone())),
            })
            .collect()
    }

    pub fn obstacles(&self) -> Vec<Obstacle> {
        self.file
            .obstacles
            .iter()
            .map(|o| Obstacle {
                name: o.name.clone(),
                x: o.x,
                y: o.y,
                radius: o.radius,
            })
            .collect()
    }

    pub fn camera(&self) -> Option<CameraFollow> {
        self.file.camera.as_ref().map(|c| {
            CameraFollow::new(
                c.target.clone(),
                CameraTuning {
                    offset_x: c.offset_x,
                    offset_y: c.offset_y,
                    depth: c.depth,
                },
            )
        })
    }

    pub fn build_session(
        &self,
        contacts: Box<dyn ContactSource>,
        renderer: Box<dyn DamageRenderer>,
        dt: f32,
    ) -> Session {
        Session::new(
            self.vehicle_setups(),
            self.obstacles(),
            self.camera(),
            contacts,
            renderer,
            dt,
        )
    }
}

fn vehicle_part(part: &PartEntry) -> VehiclePart {
    let profile = if part.disable.is_empty() {
        DamageProfile::Body
    } else {
        DamageProfile::Special {
            disable: part.disable.clone(),
        }
    };
    VehiclePart {
        damageable: Damageable::new(part.name.clone(), profile),
        offset_x: part.offset_x,
        offset_y: part.offset_y,
        radius: part.radius,
    }
}

fn validate(file: &SceneFile) -> Result<(), SceneError> {
    if file.vehicles.is_empty() {
        return Err(SceneError::NoVehicles);
    }

    let mut names = HashSet::new();
    for vehicle in &file.vehicles {
        if !names.insert(vehicle.name.as_str()) {
            return Err(SceneError::DuplicateName(vehicle.name.clone()));
        }

        let invalid = |field| SceneError::InvalidValue {
            entity: vehicle.name.clone(),
            field,
        };
        if !(vehicle.max_speed.is_finite() && vehicle.max_speed > 0.0) {
            return Err(invalid("max_speed"));
        }
        if !(vehicle.max_steer_rate.is_finite() && vehicle.max_steer_rate >= 0.0) {
            return Err(invalid("max_steer_rate"));
        }
        if !(vehicle.brake_strength.is_finite() && vehicle.brake_strength > 0.0) {
            return Err(invalid("brake_strength"));
        }
        if !(vehicle.radius.is_finite() && vehicle.radius > 0.0) {
            return Err(invalid("radius"));
        }
        if ![vehicle.x, vehicle.y, vehicle.heading].iter().all(|v| v.is_finite()) {
            return Err(invalid("pose"));
        }

        let mut parts = HashSet::from([vehicle.name.as_str()]);
        for part in &vehicle.parts {
            if !parts.insert(part.name.as_str()) {
                return Err(SceneError::DuplicateName(part.name.clone()));
            }
            let invalid = |field| SceneError::InvalidValue {
                entity: part.name.clone(),
                field,
            };
            if !(part.radius.is_finite() && part.radius > 0.0) {
                return Err(invalid("radius"));
            }
            if !(part.offset_x.is_finite() && part.offset_y.is_finite()) {
                return Err(invalid("offset"));
            }
        }
    }

    for obstacle in &file.obstacles {
        if !names.insert(obstacle.name.as_str()) {
            return Err(SceneError::DuplicateName(obstacle.name.clone()));
        }
        if !(obstacle.radius.is_finite() && obstacle.radius > 0.0) {
            return Err(SceneError::InvalidValue {
                entity: obstacle.name.clone(),
                field: "radius",
            });
        }
    }

    if let Some(camera) = &file.camera {
        if !file.vehicles.iter().any(|v| v.name == camera.target) {
            return Err(SceneError::UnknownCameraTarget(camera.target.clone()));
        }
    }

    Ok(())
}
