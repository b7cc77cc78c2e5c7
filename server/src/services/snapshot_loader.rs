use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use clubboard_shared::{LoadStatus, Snapshot, parse_snapshot};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::CACHE_BUST_PARAM;
use crate::error::LoadError;

/// Status of the latest load plus the last snapshot that loaded successfully.
///
/// Replaced as a whole on every transition.
#[derive(Debug, Clone, Default)]
pub struct LoadState {
    pub status: LoadStatus,
    pub snapshot: Arc<Snapshot>,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl LoadState {
    fn with_status(&self, status: LoadStatus) -> Self {
        Self {
            status,
            snapshot: Arc::clone(&self.snapshot),
            loaded_at: self.loaded_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// Cancelled or superseded by a newer load; state was left untouched.
    Discarded,
}

#[derive(Clone)]
pub struct SnapshotLoader {
    endpoint: Option<Arc<str>>,
    client: reqwest::Client,
    state: Arc<RwLock<LoadState>>,
    generation: Arc<AtomicU64>,
    /// Token of the most recently started load. Starting a new load cancels it.
    in_flight: Arc<Mutex<CancellationToken>>,
}

impl SnapshotLoader {
    pub fn new(endpoint: Option<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.map(Arc::from),
            client,
            state: Arc::new(RwLock::new(LoadState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Arc::new(Mutex::new(CancellationToken::new())),
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub async fn current(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Start a load in the background. Cancelling the returned token aborts its fetch
    /// and drops its result.
    pub fn spawn_load(&self) -> CancellationToken {
        let cancel = CancellationToken::new();
        let (generation, token) = self.begin(&cancel);
        let loader = self.clone();
        tokio::spawn(async move {
            loader.run(generation, token).await;
        });
        cancel
    }

    /// Run one load to completion. Any load started earlier is cancelled.
    pub async fn load(&self, cancel: &CancellationToken) -> LoadOutcome {
        let (generation, token) = self.begin(cancel);
        self.run(generation, token).await
    }

    /// Claims the next generation and cancels whichever load held the previous one.
    fn begin(&self, cancel: &CancellationToken) -> (u64, CancellationToken) {
        let token = cancel.child_token();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *in_flight, token.clone());
        previous.cancel();
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        (generation, token)
    }

    async fn run(&self, generation: u64, token: CancellationToken) -> LoadOutcome {
        let Some(endpoint) = self.endpoint.clone() else {
            return self
                .finish(generation, &token, Err(LoadError::Configuration))
                .await;
        };

        {
            let mut state = self.state.write().await;
            if !self.is_current(generation, &token) {
                return LoadOutcome::Discarded;
            }
            *state = state.with_status(LoadStatus::Loading);
        }

        let result = tokio::select! {
            () = token.cancelled() => {
                debug!(generation, "snapshot fetch cancelled");
                return LoadOutcome::Discarded;
            }
            result = fetch_snapshot(&self.client, &endpoint) => result,
        };
        self.finish(generation, &token, result).await
    }

    async fn finish(
        &self,
        generation: u64,
        token: &CancellationToken,
        result: Result<Snapshot, LoadError>,
    ) -> LoadOutcome {
        let mut state = self.state.write().await;
        if !self.is_current(generation, token) {
            debug!(generation, "discarding stale snapshot load");
            return LoadOutcome::Discarded;
        }

        *state = match result {
            Ok(snapshot) => {
                info!(
                    members = snapshot.members.len(),
                    updates = snapshot.updates.len(),
                    rules = snapshot.rules.len(),
                    "snapshot loaded"
                );
                LoadState {
                    status: LoadStatus::Ready,
                    snapshot: Arc::new(snapshot),
                    loaded_at: Some(Utc::now()),
                }
            }
            Err(e) => {
                warn!(error = %e, "snapshot load failed");
                state.with_status(LoadStatus::Error(e.to_string()))
            }
        };
        LoadOutcome::Applied
    }

    /// Checked under the state write lock so a cancel or newer load can't slip in between.
    fn is_current(&self, generation: u64, token: &CancellationToken) -> bool {
        !token.is_cancelled() && self.generation.load(Ordering::Acquire) == generation
    }
}

async fn fetch_snapshot(client: &reqwest::Client, endpoint: &str) -> Result<Snapshot, LoadError> {
    let cache_bust = Utc::now().timestamp_millis().to_string();
    let resp = client
        .get(endpoint)
        .query(&[(CACHE_BUST_PARAM, cache_bust)])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus(status));
    }

    let body = resp.text().await?;
    Ok(parse_snapshot(&body)?)
}
