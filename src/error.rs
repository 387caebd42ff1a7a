//! Error types for network construction, inference and training.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Debug, Error)]
pub enum NetworkError {
    /// Invalid neuron counts or hyperparameters at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A vector did not match the neuron count of the layer it was meant for.
    #[error("dimension mismatch at layer {layer}: expected {expected} values, got {actual}")]
    DimensionMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    /// `train` was given a different number of input and output examples.
    #[error("example count mismatch: {inputs} input vectors but {outputs} output vectors")]
    ExampleCountMismatch { inputs: usize, outputs: usize },

    #[error("layer {layer} is not the output layer and cannot be adjusted directly")]
    NotOutputLayer { layer: usize },

    #[error("layer {layer} has already been marked as the output layer")]
    AlreadyOutputLayer { layer: usize },

    /// A dataset file could not be interpreted.
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
