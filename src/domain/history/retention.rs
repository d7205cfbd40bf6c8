use super::service::{HistoryService, HistoryServiceApi};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Run the history sweep every `period` for the lifetime of the process.
///
/// The first run happens one period after spawning; callers sweep once at
/// startup themselves before accepting requests.
pub fn spawn_retention_task(service: Arc<HistoryService>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let Some(start) = Instant::now().checked_add(period) else {
            tracing::error!(
                period_secs = period.as_secs(),
                "History sweep period is out of range, retention task not started"
            );
            return;
        };
        let mut interval = interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            period_secs = period.as_secs(),
            retention_days = service.retention().num_days(),
            "History retention task started"
        );

        loop {
            interval.tick().await;
            if let Err(e) = service.sweep().await {
                tracing::error!(error = %e, "Scheduled history cleanup failed");
            }
        }
    })
}
