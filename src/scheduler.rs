use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::monitor::Monitor;

/// Re-run the fetch cycle every `period`, starting one period from now.
/// The startup cycle is run by the caller before the scheduler is spawned.
pub fn spawn_scheduler(monitor: Arc<Monitor>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = monitor.run_cycle().await {
                error!("Scheduled check cycle failed: {e:#}");
            }
            info!("Next check in {} seconds", period.as_secs());
        }
    })
}
