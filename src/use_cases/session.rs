// Fixed-timestep simulation of one scene: vehicles, obstacles and a follow camera.

use super::types::WorldUpdate;
use crate::domain::ports::{Body, BodyId, Contact, ContactSource, DamageRenderer, InputSource};
use crate::domain::systems::camera::CameraFollow;
use crate::domain::systems::damage::{DamageProfile, DamageTransition, Damageable, ImpactSpeeds};
use crate::domain::systems::vehicle_motion::{MotionPhase, VehicleMotion};
use crate::domain::tuning::vehicle::VehicleTuning;
use crate::domain::{CameraPosition, ControlMode, DriveIntent, Transform, VehicleSnapshot};
use tracing::{debug, info};

/// A named damageable part with its own collider, placed in the vehicle's
/// local frame.
#[derive(Debug, Clone)]
pub struct VehiclePart {
    pub damageable: Damageable,
    /// Offset along the vehicle's local right axis.
    pub offset_x: f32,
    /// Offset along the vehicle's facing direction.
    pub offset_y: f32,
    pub radius: f32,
}

/// Everything needed to spawn a vehicle into a session.
pub struct VehicleSetup {
    pub name: String,
    pub control_mode: ControlMode,
    pub transform: Transform,
    pub tuning: VehicleTuning,
    /// Collider radius.
    pub radius: f32,
    /// Independently damageable parts besides the body.
    pub parts: Vec<VehiclePart>,
    pub input: Box<dyn InputSource>,
}

pub struct Vehicle {
    name: String,
    transform: Transform,
    radius: f32,
    motion: VehicleMotion,
    body: Damageable,
    parts: Vec<VehiclePart>,
    input: Box<dyn InputSource>,
    phase: MotionPhase,
}

impl Vehicle {
    fn new(setup: VehicleSetup) -> Self {
        debug!(
            vehicle = %setup.name,
            control_mode = ?setup.control_mode,
            parts = setup.parts.len(),
            "vehicle spawned"
        );
        Self {
            body: Damageable::new(setup.name.clone(), DamageProfile::Body),
            name: setup.name,
            transform: setup.transform,
            radius: setup.radius,
            motion: VehicleMotion::new(setup.tuning),
            parts: setup.parts,
            input: setup.input,
            phase: MotionPhase::Idle,
        }
    }

    fn advance(&mut self, intent: &DriveIntent, dt: f32) {
        let (phase, delta) = self.motion.tick(intent, dt);
        self.transform.apply(delta);

        if phase != self.phase {
            debug!(
                vehicle = %self.name,
                ?phase,
                speed = self.motion.current_speed(),
                "motion phase changed"
            );
            self.phase = phase;
        }
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            name: self.name.clone(),
            x: self.transform.x,
            y: self.transform.y,
            heading: self.transform.heading,
            speed: self.motion.current_speed(),
            damaged: self.body.is_damaged(),
            damaged_parts: self
                .parts
                .iter()
                .filter(|p| p.damageable.is_damaged())
                .map(|p| p.damageable.name().to_string())
                .collect(),
        }
    }
}

/// Static scenery with a collider but no motion model.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

pub struct Session {
    tick: u64,
    dt: f32,
    vehicles: Vec<Vehicle>,
    obstacles: Vec<Obstacle>,
    camera: Option<CameraFollow>,
    contacts: Box<dyn ContactSource>,
    renderer: Box<dyn DamageRenderer>,
}

impl Session {
    pub fn new(
        vehicles: Vec<VehicleSetup>,
        obstacles: Vec<Obstacle>,
        camera: Option<CameraFollow>,
        contacts: Box<dyn ContactSource>,
        renderer: Box<dyn DamageRenderer>,
        dt: f32,
    ) -> Self {
        Self {
            tick: 0,
            dt,
            vehicles: vehicles.into_iter().map(Vehicle::new).collect(),
            obstacles,
            camera,
            contacts,
            renderer,
        }
    }

    pub fn ticks_elapsed(&self) -> u64 {
        self.tick
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, name: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.name == name)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Advances the scene by one fixed step.
    ///
    /// Order: input intents, motion, contact detection, damage, camera.
    pub fn tick(&mut self) -> WorldUpdate {
        self.tick += 1;

        for vehicle in &mut self.vehicles {
            let intent = vehicle.input.intent();
            vehicle.advance(&intent, self.dt);
        }

        let bodies = self.bodies();
        for contact in self.contacts.detect(&bodies) {
            self.resolve_contact(contact);
        }

        WorldUpdate {
            tick: self.tick,
            vehicles: self.vehicles.iter().map(Vehicle::snapshot).collect(),
            camera: self.camera_position(),
        }
    }

    fn bodies(&self) -> Vec<Body> {
        let vehicles = self.vehicles.iter().enumerate().map(|(i, v)| Body {
            id: BodyId::Vehicle(i),
            x: v.transform.x,
            y: v.transform.y,
            radius: v.radius,
        });
        let parts = self.vehicles.iter().enumerate().flat_map(|(vehicle, v)| {
            v.parts.iter().enumerate().map(move |(part, p)| {
                let (x, y) = v.transform.local_to_world(p.offset_x, p.offset_y);
                Body {
                    id: BodyId::Part { vehicle, part },
                    x,
                    y,
                    radius: p.radius,
                }
            })
        });
        let obstacles = self.obstacles.iter().enumerate().map(|(i, o)| Body {
            id: BodyId::Obstacle(i),
            x: o.x,
            y: o.y,
            radius: o.radius,
        });
        vehicles.chain(parts).chain(obstacles).collect()
    }

    fn speed_of(&self, id: BodyId) -> Option<f32> {
        let index = id.vehicle()?;
        self.vehicles.get(index).map(|v| v.motion.current_speed())
    }

    // Each side evaluates the same pair of speeds from its own point of view.
    fn resolve_contact(&mut self, contact: Contact) {
        let speed_a = self.speed_of(contact.a);
        let speed_b = self.speed_of(contact.b);
        debug!(a = ?contact.a, b = ?contact.b, ?speed_a, ?speed_b, "contact");

        self.damage_side(contact.a, speed_a, speed_b);
        self.damage_side(contact.b, speed_b, speed_a);
    }

    // The body takes every contact on the vehicle; a part only those on its own collider.
    fn damage_side(&mut self, id: BodyId, own: Option<f32>, other: Option<f32>) {
        let (Some(index), Some(own)) = (id.vehicle(), own) else {
            return;
        };
        let Some(vehicle) = self.vehicles.get_mut(index) else {
            return;
        };

        let speeds = ImpactSpeeds::from_signed(own, other);
        let mut transitions: Vec<DamageTransition> =
            vehicle.body.on_contact(speeds).into_iter().collect();
        if let BodyId::Part { part, .. } = id {
            if let Some(part) = vehicle.parts.get_mut(part) {
                transitions.extend(part.damageable.on_contact(speeds));
            }
        }

        for transition in transitions {
            info!(
                vehicle = %vehicle.name,
                entity = %transition.entity,
                own_speed = speeds.own,
                other_speed = ?speeds.other,
                "damaged"
            );
            self.renderer
                .swap_to_damaged(&vehicle.name, &transition.entity);
            for part in &transition.disable {
                self.renderer.deactivate_part(&vehicle.name, part);
            }
        }
    }

    fn camera_position(&self) -> Option<CameraPosition> {
        let camera = self.camera.as_ref()?;
        let target = self.vehicle(&camera.target)?;
        Some(camera.follow(target.transform.x, target.transform.y))
    }
}
