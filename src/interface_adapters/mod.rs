// Interface adapters: input devices, collision, rendering, scene files and snapshots.

pub mod contacts;
pub mod input;
pub mod protocol;
pub mod renderer;
pub mod scene;
pub mod snapshots;
