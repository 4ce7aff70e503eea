/// Result alias that carries the custom [`SortVizError`] type.
pub type Result<T> = std::result::Result<T, SortVizError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum SortVizError {
    /// An algorithm selector name outside the supported set.
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
    /// Input that violates an engine precondition (e.g. radix sort fed
    /// negative or fractional values).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Counting-sort key extraction produced a key outside the supported
    /// integer key space.
    #[error("value {value} maps to key {key}, outside the supported key range")]
    KeyRange { value: f32, key: i64 },
    /// A trace produced against an array of a different length than the one
    /// it is being replayed on.
    #[error("trace was recorded against {expected} elements but the live array holds {actual}")]
    ForeignTrace { expected: usize, actual: usize },
    /// A trace that has already been fully consumed.
    #[error("trace has already been drained")]
    TraceDrained,
    /// `play` was invoked while a previous replay is still running.
    #[error("a replay is already in progress")]
    ReplayInProgress,
    /// An operation referenced a position outside the live array.
    #[error("operation index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// JSON failure while loading configuration or exporting a trace.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
