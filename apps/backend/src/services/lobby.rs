use std::sync::Arc;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::services::sessions::SessionDirectory;

/// Periodically drop pending sessions that never found an opponent.
pub fn spawn_lobby_sweeper(
    directory: Arc<SessionDirectory>,
    every: std::time::Duration,
    max_age: time::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let removed = directory.remove_expired(OffsetDateTime::now_utc(), max_age);
            debug!(removed = removed.len(), remaining = directory.len(), "Lobby sweep");
        }
    })
}
