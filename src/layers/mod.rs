pub mod layer;
pub mod dense;

pub use layer::{Layer, LayerParams, Neuron, Predecessor};
pub use dense::{DenseLayer, DenseNeuron};
