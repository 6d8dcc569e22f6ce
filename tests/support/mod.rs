// Shared helpers for building and stepping scenes in integration tests.
#![allow(dead_code)]

use car_damage::interface_adapters::contacts::CircleContacts;
use car_damage::interface_adapters::renderer::LogRenderer;
use car_damage::interface_adapters::scene::Scene;
use car_damage::use_cases::{Session, WorldUpdate};
use std::path::PathBuf;

// Fixed step used by the scenarios (50 Hz).
pub const DT: f32 = 0.02;

// Parse a scene and wire it to the circle contact detector and a shared renderer.
pub fn session_from(toml: &str) -> (Session, LogRenderer) {
    let scene = Scene::parse(toml).expect("scene should parse");
    build(&scene)
}

pub fn build(scene: &Scene) -> (Session, LogRenderer) {
    let renderer = LogRenderer::new();
    let session = scene.build_session(
        Box::new(CircleContacts::new()),
        Box::new(renderer.clone()),
        DT,
    );
    (session, renderer)
}

// Step the session and return the last world update.
pub fn run_ticks(session: &mut Session, ticks: u64) -> WorldUpdate {
    let mut last = session.tick();
    for _ in 1..ticks {
        last = session.tick();
    }
    last
}

pub fn demo_scene_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/scene.toml")
}
