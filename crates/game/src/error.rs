//! Error types for session setup and asset loading.

use std::path::PathBuf;

/// A session could not be built from its configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("patrol path has no waypoints")]
    EmptyPatrolPath,
    #[error("patrol speed must be positive and finite, got {0}")]
    InvalidPatrolSpeed(f32),
    #[error("patrol arrival epsilon must be positive and finite, got {0}")]
    InvalidArrivalEpsilon(f32),
}

/// A model bundle needed by the third-person variant could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0:?} is empty")]
    Empty(PathBuf),
    #[error("could not start the asset loader: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("asset loader stopped without a result")]
    LoaderStopped,
}
