use thiserror::Error;

/// A puzzle definition that cannot be searched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("container area {container} does not match total piece area {pieces}")]
    AreaMismatch { container: u64, pieces: u64 },

    #[error("{what} has a zero dimension")]
    ZeroDimension { what: String },

    #[error("usage refers to shape {index}, but only {available} shapes are defined")]
    UnknownShape { index: usize, available: usize },

    #[error("{count} pieces exceed the label limit of {limit}")]
    TooManyPieces { count: usize, limit: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid puzzle: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse puzzle definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("malformed results file at line {line}: {reason}")]
    Results { line: usize, reason: String },
}
