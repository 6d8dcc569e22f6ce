/// Camera framing relative to the followed vehicle.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTuning {
    pub offset_x: f32,
    pub offset_y: f32,

    /// Fixed depth of the camera plane.
    pub depth: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            depth: -10.0,
        }
    }
}
