use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::error::Result;
use crate::layers::dense::DenseLayer;
use crate::layers::layer::{Layer, LayerParams, Predecessor};
use crate::network::config::NetworkConfig;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// A linear chain of layers, input layer first, output layer last.
///
/// The network owns every layer; layers refer to their predecessor by slot
/// index only. The chain is never resized after construction.
#[derive(Debug)]
pub struct Network<L: Layer = DenseLayer> {
    layers: Vec<L>,
    learning_factor: f64,
    default_bias: f64,
    /// Diagnostic placeholder. Nothing in the network writes to it.
    network_error: f64,
}

impl Network<DenseLayer> {
    /// Builds a dense sigmoid network from per-layer neuron counts.
    pub fn new(neuron_counts: &[usize], learning_factor: f64, bias: f64) -> Result<Self> {
        let config = NetworkConfig::new(neuron_counts.to_vec())
            .with_learning_factor(learning_factor)
            .with_bias(bias);
        Network::build(&config)
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        Network::build(config)
    }
}

impl<L: Layer> Network<L> {
    /// Builds the chain with any `Layer` implementation.
    ///
    /// Each layer gets a link to the one before it and the configured bias;
    /// the last layer is then marked as the output layer, once.
    pub fn build(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut layers: Vec<L> = Vec::with_capacity(config.neuron_counts.len());
        for &neuron_count in &config.neuron_counts {
            let previous = layers.last().map(|prev| Predecessor {
                index: layers.len() - 1,
                neuron_count: prev.neuron_count(),
            });
            let params = LayerParams {
                neuron_count,
                previous,
                bias: config.bias,
                activation: config.activation,
            };
            layers.push(L::construct(params, &mut rng)?);
        }
        if let Some(last) = layers.last_mut() {
            last.mark_as_output_layer()?;
        }

        debug!(
            layers = layers.len(),
            neuron_counts = ?config.neuron_counts,
            learning_factor = config.learning_factor,
            bias = config.bias,
            "network constructed"
        );

        Ok(Network {
            layers,
            learning_factor: config.learning_factor,
            default_bias: config.bias,
            network_error: 0.0,
        })
    }

    /// Layers in construction order. Safe to call any number of times.
    pub fn layers(&self) -> std::slice::Iter<'_, L> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always `false`: construction rejects an empty chain.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn input_layer(&self) -> &L {
        &self.layers[0]
    }

    pub fn output_layer(&self) -> &L {
        &self.layers[self.layers.len() - 1]
    }

    pub fn learning_factor(&self) -> f64 {
        self.learning_factor
    }

    pub fn default_bias(&self) -> f64 {
        self.default_bias
    }

    /// Returns the stored error value verbatim; it stays at its initial 0.
    pub fn get_error(&self) -> f64 {
        self.network_error
    }

    /// Forward pass. Returns the output layer's neuron outputs in order.
    ///
    /// The input width is checked by the input layer.
    pub fn think(&mut self, input_values: &[f64]) -> Result<Vec<f64>> {
        self.layers[0].set_input(input_values)?;
        for i in 0..self.layers.len() {
            let (upstream, rest) = self.layers.split_at_mut(i);
            rest[0].think(upstream)?;
        }
        Ok(self.output_layer().outputs())
    }

    /// Trains for `iterations` passes over the paired examples and returns
    /// fresh predictions for every input, computed with the final weights.
    pub fn train(
        &mut self,
        input_values: &[Vec<f64>],
        output_values: &[Vec<f64>],
        iterations: usize,
    ) -> Result<Vec<Vec<f64>>> {
        train_loop(self, input_values, output_values, &TrainConfig::new(iterations))
    }

    pub fn train_with(
        &mut self,
        input_values: &[Vec<f64>],
        output_values: &[Vec<f64>],
        config: &TrainConfig,
    ) -> Result<Vec<Vec<f64>>> {
        train_loop(self, input_values, output_values, config)
    }

    /// Hands an error vector to the output layer, and only to it.
    pub(crate) fn adjust_output(&mut self, errors: &[f64]) -> Result<()> {
        let last = self.layers.len() - 1;
        let (upstream, rest) = self.layers.split_at_mut(last);
        rest[0].adjust(errors, upstream)
    }
}

impl<'a, L: Layer> IntoIterator for &'a Network<L> {
    type Item = &'a L;
    type IntoIter = std::slice::Iter<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
