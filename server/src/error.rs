use thiserror::Error;

/// Why a snapshot load ended in the error state. `Display` is the user-visible message.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Missing SNAPSHOT_URL: set it (or GAS_URL) in the environment.")]
    Configuration,

    #[error("Fetch failed: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Fetch failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed snapshot: {0}")]
    MalformedData(#[from] serde_json::Error),
}
