//! Error types for d2q9-bgk.

use thiserror::Error;

use crate::Float;

#[derive(Debug, Error)]
pub enum LbmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read param file: {0}")]
    MissingParam(&'static str),

    #[error("invalid param {name} = {value:?}: {reason}")]
    InvalidParam {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("obstacle file line {line}: {reason}")]
    ObstacleLine { line: usize, reason: String },

    #[error("obstacle ({x}, {y}) outside the {nx}x{ny} lattice")]
    ObstacleOutOfRange {
        x: usize,
        y: usize,
        nx: usize,
        ny: usize,
    },

    #[error("numerical instability at iteration {iteration}, cell ({x}, {y}): local density {density}")]
    Instability {
        iteration: usize,
        x: usize,
        y: usize,
        density: Float,
    },
}

pub type Result<T> = std::result::Result<T, LbmError>;
