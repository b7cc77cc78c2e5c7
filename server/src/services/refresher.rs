use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::state::AppState;

/// Reloads the snapshot on a fixed interval until `shutdown` fires. Each tick supersedes
/// the previous load.
pub async fn run(state: AppState, every: Duration, shutdown: CancellationToken) {
    info!("Snapshot refresh started (interval: {}s)", every.as_secs());

    let mut interval = tokio::time::interval(every);
    // The startup load already ran; wait a full interval before the first refresh.
    interval.tick().await;

    loop {
        tokio::select! {
            () = shutdown.cancelled() => {
                info!("Snapshot refresh stopped");
                break;
            }
            _ = interval.tick() => {
                state.loader.load(&shutdown).await;
            }
        }
    }
}
