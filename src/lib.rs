pub mod error;
pub mod activation;
pub mod loss;
pub mod layers;
pub mod network;
pub mod train;
pub mod data;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use activation::activation::ActivationFunction;
pub use loss::scaled_difference::loss;
pub use layers::layer::{Layer, LayerParams, Neuron, Predecessor};
pub use layers::dense::{DenseLayer, DenseNeuron};
pub use network::network::Network;
pub use network::config::{NetworkConfig, DEFAULT_BIAS, DEFAULT_LEARNING_FACTOR};
pub use network::report::DEFAULT_DECIMAL_PLACES;
pub use train::{IterationStats, TrainConfig, DEFAULT_ITERATIONS};
pub use data::Dataset;
