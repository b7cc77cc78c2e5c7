/// Lifecycle of the most recent snapshot load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Error(String),
}

impl LoadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Error(_) => "error",
        }
    }

    /// User-visible failure message; empty unless the load failed.
    pub fn message(&self) -> &str {
        match self {
            Self::Error(message) => message,
            Self::Loading | Self::Ready => "",
        }
    }
}
