//! Background sweep of the revocation registry.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::registry::RevocationRegistry;

/// Periodically sweeps expired entries out of a [`RevocationRegistry`].
///
/// Runs as a tokio task with an explicit stop signal tied to service
/// shutdown, so tests and clean shutdowns leak no scheduled work.
pub struct RevocationSweeper {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl RevocationSweeper {
    /// Starts sweeping `registry` every `interval`.
    pub fn start(registry: Arc<RevocationRegistry>, interval: Duration) -> Self {
        let shutdown = Arc::new(Notify::new());
        let stop = Arc::clone(&shutdown);

        let handle = tokio::spawn(async move {
            info!(
                "Revocation sweeper started - will run every {} seconds",
                interval.as_secs()
            );

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick of a tokio interval fires immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = registry.sweep();
                        if removed > 0 {
                            debug!("Revocation sweep removed {} expired entries", removed);
                        }
                    }
                    _ = stop.notified() => {
                        info!("Revocation sweeper stopping");
                        break;
                    }
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Stops the sweep loop and waits for the task to finish.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        let _ = self.handle.await;
    }
}
