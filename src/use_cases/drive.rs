// Host loop that steps a session at a fixed rate and publishes world updates.

use super::session::Session;
use super::types::{SessionState, WorldUpdate};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, watch};
use tracing::info;

/// Runtime knobs for the host loop.
#[derive(Debug, Clone)]
pub struct DriveSettings {
    /// Fixed tick interval; also the simulation step.
    pub tick_interval: Duration,
    /// Stop after this many ticks (0 runs until shutdown).
    pub max_ticks: u64,
}

/// Steps `session` on every interval tick until `max_ticks` or shutdown.
///
/// Returns the session so callers can inspect its final state.
pub async fn session_task(
    mut session: Session,
    world_tx: broadcast::Sender<WorldUpdate>,
    state_tx: watch::Sender<SessionState>,
    settings: DriveSettings,
    shutdown: Arc<Notify>,
) -> Session {
    let _ = state_tx.send(SessionState::Running);
    let mut interval = tokio::time::interval(settings.tick_interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("shutdown requested");
                break;
            }
            _ = interval.tick() => {}
        }

        let update = session.tick();
        let tick = update.tick;
        // No subscribers is fine; snapshots are optional.
        let _ = world_tx.send(update);

        if settings.max_ticks != 0 && tick >= settings.max_ticks {
            break;
        }
    }

    let ticks = session.ticks_elapsed();
    info!(ticks, "session finished");
    let _ = state_tx.send(SessionState::Finished { ticks });
    session
}
