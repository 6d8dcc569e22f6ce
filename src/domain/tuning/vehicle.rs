/// Gameplay tuning for player-controlled cars.
///
/// Keep this separate from runtime configuration (tick rates, channel sizes, etc.).

/// Speed change per accelerating tick.
pub const ACCEL_STEP: f32 = 0.05;

/// Steer rate change per tick, both when building up and when decaying.
pub const STEER_STEP: f32 = 0.01;

/// Braking strength applied when no intent is held.
pub const IDLE_DECAY: f32 = 0.1;

/// Slack on the pre-increment bound checks so accumulated f32 rounding of the
/// fixed steps never adds or drops an increment.
pub const BOUND_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleTuning {
    /// Nominal top speed in units per second, both directions.
    pub max_speed: f32,

    /// Nominal top steer rate in degrees per tick.
    pub max_steer: f32,

    /// Speed removed per tick while the brake is held.
    pub brake_strength: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            max_speed: 7.0,
            max_steer: 2.0,
            brake_strength: 0.2,
        }
    }
}
