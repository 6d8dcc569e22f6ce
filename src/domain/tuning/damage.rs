/// Impact speed that must be strictly exceeded by either participant to
/// damage an entity.
pub const DAMAGE_SPEED_THRESHOLD: f32 = 3.5;
