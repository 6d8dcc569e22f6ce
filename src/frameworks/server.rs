// Framework bootstrap for the headless simulation runtime.

use crate::domain::VehicleSnapshot;
use crate::frameworks::config;
use crate::interface_adapters::contacts::CircleContacts;
use crate::interface_adapters::renderer::{LogRenderer, VisualState};
use crate::interface_adapters::scene::Scene;
use crate::interface_adapters::snapshots::snapshot_writer;
use crate::use_cases::drive::{DriveSettings, session_task};
use crate::use_cases::{SessionState, WorldUpdate};

use std::{io::Result, path::Path, sync::Arc};
use tokio::sync::{Notify, broadcast, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub drive: DriveSettings,
    /// Emit every n-th update on stdout; `None` disables snapshots.
    pub snapshot_every: Option<u64>,
}

/// Final state of a finished run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub vehicles: Vec<VehicleSnapshot>,
    pub visuals: VisualState,
}

pub async fn run(scene: Scene, settings: RunSettings) -> Result<RunSummary> {
    let renderer = LogRenderer::new();
    let session = scene.build_session(
        Box::new(CircleContacts::new()),
        Box::new(renderer.clone()),
        settings.drive.tick_interval.as_secs_f32(),
    );
    tracing::info!(
        vehicles = session.vehicles().len(),
        obstacles = session.obstacles().len(),
        tick_ms = settings.drive.tick_interval.as_millis(),
        max_ticks = settings.drive.max_ticks,
        "scene loaded"
    );

    let (world_tx, _world_rx) = broadcast::channel::<WorldUpdate>(config::WORLD_BROADCAST_CAPACITY);
    let (state_tx, state_rx) = watch::channel(SessionState::Loading);

    // The writer exits once the session task drops the sender.
    let writer = settings
        .snapshot_every
        .map(|every| tokio::spawn(snapshot_writer(world_tx.subscribe(), tokio::io::stdout(), every)));

    let shutdown = Arc::new(Notify::new());
    let signal_shutdown = shutdown.clone();
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_shutdown.notify_one();
        }
    });

    let session = tokio::spawn(session_task(
        session,
        world_tx,
        state_tx,
        settings.drive,
        shutdown,
    ))
    .await
    .map_err(|e| std::io::Error::other(format!("session task failed: {e}")))?;
    signal.abort();

    if let Some(writer) = writer {
        writer
            .await
            .map_err(|e| std::io::Error::other(format!("snapshot writer failed: {e}")))?;
    }

    let ticks = match *state_rx.borrow() {
        SessionState::Finished { ticks } => ticks,
        _ => session.ticks_elapsed(),
    };
    let vehicles: Vec<VehicleSnapshot> = session.vehicles().iter().map(|v| v.snapshot()).collect();
    for v in &vehicles {
        tracing::info!(
            vehicle = %v.name,
            x = v.x,
            y = v.y,
            speed = v.speed,
            damaged = v.damaged,
            damaged_parts = ?v.damaged_parts,
            "final state"
        );
    }

    Ok(RunSummary {
        ticks,
        vehicles,
        visuals: renderer.visual_state(),
    })
}

// Errors are returned, not logged; the binary reports them once on exit.
fn load_scene(path: &Path) -> Result<Scene> {
    Scene::load(path).map_err(std::io::Error::other)
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let scene = load_scene(&config::scene_path())?;

    let settings = RunSettings {
        drive: DriveSettings {
            tick_interval: config::tick_interval(),
            max_ticks: config::max_ticks(),
        },
        snapshot_every: config::snapshot_every(),
    };

    run(scene, settings).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface_adapters::scene::SceneError;

    #[test]
    fn scene_load_failure_keeps_the_path_in_the_error() {
        let err = load_scene(Path::new("missing/scene.toml")).expect_err("scene is missing");
        assert!(err.to_string().contains("missing/scene.toml"));
        assert!(err.get_ref().is_some_and(|inner| inner.is::<SceneError>()));
    }
}
