//! Error types for the move-selection engine.
//!
//! Everything fallible in the crate reports through [`EngineError`]:
//! model loading and inference, position parsing, tensor shape
//! validation, sampling, and configuration loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Wraps an error returned by the underlying ONNX Runtime bindings.
    #[error("ONNX Runtime error: {0}")]
    Ort(#[from] ort::Error),

    /// The provided FEN string could not be parsed.
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    /// A parsed position is invalid from the perspective of `shakmaty`.
    #[error("Invalid Chess Position: {0}")]
    InvalidPosition(#[from] shakmaty::PositionError<shakmaty::Chess>),

    /// An ndarray reshape failed while preparing model input.
    #[error("Tensor shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    /// A tensor handed to (or returned by) the scoring model has the
    /// wrong dimensions.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// The move probabilities could not be turned into a sampling
    /// distribution (all zero, negative or not finite).
    #[error("Sampling error: {0}")]
    Sampling(#[from] rand::distributions::WeightedError),

    /// The agent configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A neural agent was configured without a model to load.
    #[error("Neural evaluator requires `model_path`")]
    MissingModelPath,
}
