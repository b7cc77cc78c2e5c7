use std::time::Duration;

use tracing::warn;

use crate::config::{upstream_connect_timeout, upstream_http_timeout};
use crate::services::snapshot_loader::SnapshotLoader;

#[derive(Clone)]
pub struct AppState {
    pub loader: SnapshotLoader,
}

impl AppState {
    pub fn new(endpoint: Option<String>) -> Result<Self, reqwest::Error> {
        let client = build_http_client(upstream_http_timeout(), upstream_connect_timeout())?;
        Ok(Self {
            loader: SnapshotLoader::new(endpoint, client),
        })
    }
}

/// Every client this returns enforces both timeouts; only the user agent is optional.
fn build_http_client(
    request_timeout: Duration,
    connect_timeout: Duration,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent("clubboard/0.1")
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .build()
        .or_else(|e| {
            warn!(
                error = %e,
                "failed to build configured HTTP client, retrying without custom user-agent"
            );
            reqwest::Client::builder()
                .timeout(request_timeout)
                .connect_timeout(connect_timeout)
                .build()
        })
}
