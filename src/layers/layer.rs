use rand::rngs::StdRng;

use crate::activation::activation::ActivationFunction;
use crate::error::Result;

/// Non-owning link from a layer to the one built before it.
///
/// `index` is the predecessor's slot in the network's layer vector; the
/// network owns every layer, so a layer only ever remembers where its
/// predecessor lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predecessor {
    pub index: usize,
    pub neuron_count: usize,
}

/// Everything a layer needs to build itself.
#[derive(Debug, Clone, Copy)]
pub struct LayerParams {
    pub neuron_count: usize,
    /// `None` for the input layer.
    pub previous: Option<Predecessor>,
    pub bias: f64,
    pub activation: ActivationFunction,
}

/// A single element of a layer exposing one numeric output.
pub trait Neuron {
    fn output(&self) -> f64;
}

/// Capabilities `Network` relies on. The network never looks past this trait.
///
/// Methods that need the predecessor receive `upstream`: the slice of every
/// layer built before this one, in construction order. A layer looks up its
/// predecessor in it through the index it was constructed with.
pub trait Layer: Sized {
    type Neuron: Neuron;

    fn construct(params: LayerParams, rng: &mut StdRng) -> Result<Self>;

    fn neuron_count(&self) -> usize;

    /// Stores the raw input. Only meaningful on the input layer.
    fn set_input(&mut self, values: &[f64]) -> Result<()>;

    /// Recomputes this layer's neuron outputs from its predecessor's outputs,
    /// or from the raw input when it has no predecessor.
    fn think(&mut self, upstream: &[Self]) -> Result<()>;

    /// Neurons in a fixed order; the slice can be walked any number of times.
    fn neurons(&self) -> &[Self::Neuron];

    /// Mutates the weights given an error vector sized to this layer.
    ///
    /// How far the adjustment reaches into `upstream` is up to the
    /// implementation.
    fn adjust(&mut self, errors: &[f64], upstream: &mut [Self]) -> Result<()>;

    /// One-time switch performed on the last layer during network construction.
    fn mark_as_output_layer(&mut self) -> Result<()>;

    fn is_output_layer(&self) -> bool;

    fn outputs(&self) -> Vec<f64> {
        self.neurons().iter().map(Neuron::output).collect()
    }
}
