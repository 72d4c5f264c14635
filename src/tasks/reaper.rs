//! Reaper Task
//!
//! Background task that periodically purges stale cache entries.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::SharedStore;

/// Spawns the reaper for one cache.
///
/// The first pass runs one interval after this call, then once per interval.
/// Passes never overlap: each scan completes before the next tick is awaited,
/// and ticks missed during a slow scan are delayed rather than bunched up.
///
/// The task exits when `true` is sent on the shutdown channel or when the
/// sender is dropped.
///
/// # Arguments
/// * `runtime` - Runtime to spawn on
/// * `shared` - Store shared with the cache handles
/// * `shutdown_rx` - Shutdown signal owned by the cache handle
pub(crate) fn spawn_reaper_task(
    runtime: &Handle,
    shared: Arc<SharedStore>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let period = shared.interval();
    let first_tick = Instant::now() + period;

    runtime.spawn(async move {
        let mut ticker = time::interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_ms = period.as_millis() as u64, "Starting cache reaper");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let (removed, remaining) = shared.reap();

                    if removed > 0 {
                        info!(removed, remaining, "Cache reap: removed stale entries");
                    } else {
                        debug!(remaining, "Cache reap: no stale entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    // Err means every cache handle is gone
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    })
}
