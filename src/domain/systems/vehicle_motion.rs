use crate::domain::state::{Direction, DriveIntent, PoseDelta};
use crate::domain::tuning::vehicle::{
    ACCEL_STEP, BOUND_EPSILON, IDLE_DECAY, STEER_STEP, VehicleTuning,
};

/// Which branch of the per-tick dispatch ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    Accelerating(Direction),
    /// Hard brake held.
    Braking(Direction),
    /// No intent held; idle decay applied.
    Coasting(Direction),
    /// No intent and no direction latch set.
    Idle,
}

/// Longitudinal speed and steer-rate state of a single car.
///
/// Both bounds are checked before the step is applied, so speed and steer rate
/// can overshoot their maxima by exactly one step. That overshoot is part of
/// the handling model.
#[derive(Debug, Clone)]
pub struct VehicleMotion {
    tuning: VehicleTuning,
    speed: f32,
    steer_rate: f32,

    // Direction latches select the decay branch once input stops.
    moving_forward: bool,
    moving_backward: bool,
}

impl VehicleMotion {
    pub fn new(tuning: VehicleTuning) -> Self {
        Self {
            tuning,
            speed: 0.0,
            steer_rate: 0.0,
            moving_forward: false,
            moving_backward: false,
        }
    }

    pub fn tuning(&self) -> &VehicleTuning {
        &self.tuning
    }

    /// Signed speed; positive is forward.
    pub fn current_speed(&self) -> f32 {
        self.speed
    }

    pub fn steer_rate(&self) -> f32 {
        self.steer_rate
    }

    pub fn moving_forward(&self) -> bool {
        self.moving_forward
    }

    pub fn moving_backward(&self) -> bool {
        self.moving_backward
    }

    /// Runs exactly one dispatch branch for this tick, first match wins:
    /// forward, reverse, hard brake, idle decay, nothing.
    pub fn tick(&mut self, intent: &DriveIntent, dt: f32) -> (MotionPhase, PoseDelta) {
        let steer = intent.steer_sign();

        if intent.accelerate {
            let delta = self.apply_acceleration(Direction::Forward, steer, dt);
            return (MotionPhase::Accelerating(Direction::Forward), delta);
        }
        if intent.reverse {
            let delta = self.apply_acceleration(Direction::Backward, steer, dt);
            return (MotionPhase::Accelerating(Direction::Backward), delta);
        }

        let Some(direction) = self.latched_direction() else {
            return (MotionPhase::Idle, PoseDelta::default());
        };

        if intent.brake {
            let strength = self.tuning.brake_strength;
            let delta = self.apply_braking(direction, strength, steer, dt);
            (MotionPhase::Braking(direction), delta)
        } else {
            let delta = self.apply_braking(direction, IDLE_DECAY, steer, dt);
            (MotionPhase::Coasting(direction), delta)
        }
    }

    /// Steps speed toward `direction` and builds up steer rate.
    ///
    /// `steer` is +1 for left, -1 for right, 0 for none. The heading turns by
    /// the steer rate held before this tick's increment.
    pub fn apply_acceleration(&mut self, direction: Direction, steer: f32, dt: f32) -> PoseDelta {
        let max_speed = self.tuning.max_speed;
        match direction {
            Direction::Forward => {
                self.moving_forward = true;
                if self.speed <= max_speed + BOUND_EPSILON {
                    self.speed += ACCEL_STEP;
                }
            }
            Direction::Backward => {
                self.moving_backward = true;
                if -max_speed - BOUND_EPSILON <= self.speed {
                    self.speed -= ACCEL_STEP;
                }
            }
        }

        // Reversing mirrors the steering.
        let rotation = steer * self.steer_rate * direction.sign();

        if self.steer_rate <= self.tuning.max_steer + BOUND_EPSILON {
            self.steer_rate += STEER_STEP;
        }

        PoseDelta {
            rotation,
            forward: self.speed * dt,
        }
    }

    /// Decays speed toward zero for the latched `direction` by `strength`.
    ///
    /// Once speed has crossed zero the latch clears instead, which leaves one
    /// tick of residual creep in the opposite direction.
    pub fn apply_braking(
        &mut self,
        direction: Direction,
        strength: f32,
        steer: f32,
        dt: f32,
    ) -> PoseDelta {
        let mut rotation = 0.0;
        match direction {
            Direction::Forward => {
                if self.speed >= 0.0 {
                    self.speed -= strength;
                    rotation = steer * self.steer_rate;
                } else {
                    self.moving_forward = false;
                }
            }
            Direction::Backward => {
                if self.speed <= 0.0 {
                    self.speed += strength;
                    rotation = -steer * self.steer_rate;
                } else {
                    self.moving_backward = false;
                }
            }
        }

        if self.steer_rate > 0.0 {
            self.steer_rate = (self.steer_rate - STEER_STEP).max(0.0);
        }

        PoseDelta {
            rotation,
            forward: self.speed * dt,
        }
    }

    fn latched_direction(&self) -> Option<Direction> {
        if self.moving_forward {
            Some(Direction::Forward)
        } else if self.moving_backward {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}
