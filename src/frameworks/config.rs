use std::{env, path::PathBuf, time::Duration};

// Runtime constants (not gameplay tuning).

pub const WORLD_BROADCAST_CAPACITY: usize = 128;

pub fn scene_path() -> PathBuf {
    env::var("CAR_SCENE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("demos/scene.toml"))
}

/// Fixed simulation step. Zero is rejected because the host interval cannot tick at 0.
pub fn tick_interval() -> Duration {
    let millis = env::var("TICK_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|&value| value > 0)
        .unwrap_or(20);
    Duration::from_millis(millis)
}

// 0 runs until Ctrl-C.
pub fn max_ticks() -> u64 {
    env::var("MAX_TICKS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(600)
}

/// Emit every n-th world update as a JSON line on stdout; unset or 0 disables.
pub fn snapshot_every() -> Option<u64> {
    env::var("SNAPSHOT_EVERY")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|&value| value > 0)
}
