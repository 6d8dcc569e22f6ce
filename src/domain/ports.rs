use crate::domain::state::DriveIntent;

// Port for the per-vehicle input device.
pub trait InputSource: Send {
    /// Resolves the intents held for the current tick.
    fn intent(&mut self) -> DriveIntent;
}

// Port for the visual side of damage transitions.
pub trait DamageRenderer: Send {
    fn swap_to_damaged(&mut self, vehicle: &str, entity: &str);
    fn deactivate_part(&mut self, vehicle: &str, part: &str);
}

/// Identifies a physical body by its index in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BodyId {
    Vehicle(usize),
    /// Collider of a named part, offset from its vehicle.
    Part { vehicle: usize, part: usize },
    Obstacle(usize),
}

impl BodyId {
    /// Index of the vehicle this body belongs to, if any.
    pub fn vehicle(self) -> Option<usize> {
        match self {
            BodyId::Vehicle(vehicle) | BodyId::Part { vehicle, .. } => Some(vehicle),
            BodyId::Obstacle(_) => None,
        }
    }
}

/// Collider shape handed to the contact port each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Two bodies that started touching this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
}

// Port for the collision system.
pub trait ContactSource: Send {
    /// Reports contacts that began since the previous call.
    fn detect(&mut self, bodies: &[Body]) -> Vec<Contact>;
}
