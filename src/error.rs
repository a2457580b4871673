//! Error type shared by the simulation kernel and its codecs

use thiserror::Error;

/// Everything that can go wrong inside the crate.
///
/// All variants are contract violations surfaced to the caller; nothing is
/// retried or swallowed.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot divide a vector by zero")]
    DivisionByZero,

    #[error("angle is undefined for a zero-length vector")]
    DegenerateVector,

    #[error("checkpoint sequence is empty")]
    EmptyTrack,

    #[error("checkpoint index {index} out of range for {len} checkpoints")]
    CheckpointOutOfRange { index: usize, len: usize },

    #[error("no pod with id {0}")]
    UnknownPod(u32),

    #[error("invalid {field}: {value}")]
    InvalidPhysics { field: &'static str, value: f64 },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
