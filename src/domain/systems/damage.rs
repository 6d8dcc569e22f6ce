use crate::domain::tuning::damage::DAMAGE_SPEED_THRESHOLD;

/// Speed magnitudes of the two participants of a contact, as seen by one of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactSpeeds {
    pub own: f32,
    /// `None` when the partner has no motion model (scenery, obstacles).
    pub other: Option<f32>,
}

impl ImpactSpeeds {
    /// Builds the pair from signed speeds, keeping only magnitudes.
    pub fn from_signed(own: f32, other: Option<f32>) -> Self {
        Self {
            own: own.abs(),
            other: other.map(f32::abs),
        }
    }

    /// The same contact seen from the partner's side.
    pub fn mirrored(&self) -> Option<Self> {
        self.other.map(|other| Self {
            own: other,
            other: Some(self.own),
        })
    }
}

/// Shared trigger rule: either participant moving strictly faster than the threshold.
pub fn evaluate(own_speed: f32, other_speed: Option<f32>) -> bool {
    own_speed.max(other_speed.unwrap_or(0.0)) > DAMAGE_SPEED_THRESHOLD
}

/// One-shot damage latch owned by a damageable entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageState {
    damaged: bool,
}

impl DamageState {
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    /// Returns true only on the call that flips the latch.
    pub fn mark_damaged(&mut self) -> bool {
        if self.damaged {
            return false;
        }
        self.damaged = true;
        true
    }
}

/// Effect set a damageable applies on its transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageProfile {
    /// Sprite swap only.
    Body,
    /// Sprite swap plus deactivation of the listed sub-objects.
    Special { disable: Vec<String> },
}

/// One-time effects produced when a damageable latches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageTransition {
    pub entity: String,
    pub disable: Vec<String>,
}

/// A vehicle body or named part that can be damaged exactly once.
#[derive(Debug, Clone)]
pub struct Damageable {
    name: String,
    profile: DamageProfile,
    state: DamageState,
}

impl Damageable {
    pub fn new(name: impl Into<String>, profile: DamageProfile) -> Self {
        Self {
            name: name.into(),
            profile,
            state: DamageState::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &DamageProfile {
        &self.profile
    }

    pub fn is_damaged(&self) -> bool {
        self.state.is_damaged()
    }

    /// Applies the trigger rule to a contact and latches on success.
    pub fn on_contact(&mut self, speeds: ImpactSpeeds) -> Option<DamageTransition> {
        if self.state.is_damaged() || !evaluate(speeds.own, speeds.other) {
            return None;
        }
        self.mark_damaged()
    }

    /// Latches without evaluating. Returns the effects on the first call only.
    pub fn mark_damaged(&mut self) -> Option<DamageTransition> {
        if !self.state.mark_damaged() {
            return None;
        }

        let disable = match &self.profile {
            DamageProfile::Body => Vec::new(),
            DamageProfile::Special { disable } => disable.clone(),
        };
        Some(DamageTransition {
            entity: self.name.clone(),
            disable,
        })
    }
}
