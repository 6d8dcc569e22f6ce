// Headless renderer that tracks visual damage state and logs transitions.

use crate::domain::ports::DamageRenderer;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// What the scene currently looks like as far as damage is concerned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualState {
    /// `(vehicle, entity)` pairs showing their damaged sprite.
    pub damaged_sprites: BTreeSet<(String, String)>,
    /// `(vehicle, part)` pairs that have been deactivated.
    pub inactive_parts: BTreeSet<(String, String)>,
}

/// Cloneable handle; every clone shares the same visual state.
#[derive(Debug, Clone, Default)]
pub struct LogRenderer {
    state: Arc<Mutex<VisualState>>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual_state(&self) -> VisualState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, VisualState> {
        // The state stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DamageRenderer for LogRenderer {
    fn swap_to_damaged(&mut self, vehicle: &str, entity: &str) {
        info!(vehicle, entity, "sprite swapped to damaged");
        self.lock()
            .damaged_sprites
            .insert((vehicle.to_string(), entity.to_string()));
    }

    fn deactivate_part(&mut self, vehicle: &str, part: &str) {
        info!(vehicle, part, "part deactivated");
        self.lock()
            .inactive_parts
            .insert((vehicle.to_string(), part.to_string()));
    }
}
