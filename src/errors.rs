use thiserror::Error;

/// Errors raised while turning external input (JSON, CLI flags) into builder values.
#[derive(Debug, Error)]
pub enum BemError {
    /// Input that is not valid JSON, or JSON output that failed to serialize.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A modifier spec that is not an object of scalars; arrays and objects have no
    /// class-name form.
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),

    /// A `name=value` state flag whose value is neither `true` nor `false`.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Result alias used by every fallible entry point of the crate.
pub type Result<T> = std::result::Result<T, BemError>;
