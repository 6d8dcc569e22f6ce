// Writes world updates as JSON lines for external viewers.

use super::protocol::encode_update;
use crate::use_cases::WorldUpdate;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

/// Serializes every `every`-th world update into `out` until the channel closes.
///
/// Returns the writer so callers can flush or inspect it.
pub async fn snapshot_writer<W>(
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    mut out: W,
    every: u64,
) -> W
where
    W: AsyncWrite + Unpin,
{
    let every = every.max(1);
    loop {
        match world_rx.recv().await {
            Ok(update) => {
                if update.tick % every != 0 {
                    continue;
                }
                let mut line = match encode_update(&update) {
                    Ok(line) => line,
                    Err(e) => {
                        error!(error = ?e, tick = update.tick, "failed to serialize world update");
                        continue;
                    }
                };
                line.push('\n');
                if let Err(e) = out.write_all(line.as_bytes()).await {
                    error!(error = %e, "failed to write snapshot; writer exiting");
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "snapshot writer lagged; skipping to latest update");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("world updates channel closed; snapshot writer exiting");
                break;
            }
        }
    }

    if let Err(e) = out.flush().await {
        error!(error = %e, "failed to flush snapshots");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(tick: u64) -> WorldUpdate {
        WorldUpdate {
            tick,
            vehicles: Vec::new(),
            camera: None,
        }
    }

    #[tokio::test]
    async fn writes_sampled_updates_as_lines() {
        let (world_tx, world_rx) = broadcast::channel(16);
        for tick in 1..=6 {
            world_tx.send(update(tick)).expect("receiver alive");
        }
        drop(world_tx);

        let out = snapshot_writer(world_rx, Vec::new(), 2).await;
        let text = String::from_utf8(out).expect("utf8 output");
        let ticks: Vec<u64> = text
            .lines()
            .map(|l| {
                let v: serde_json::Value = serde_json::from_str(l).expect("json line");
                v["tick"].as_u64().expect("tick field")
            })
            .collect();
        assert_eq!(ticks, vec![2, 4, 6]);
    }
}
