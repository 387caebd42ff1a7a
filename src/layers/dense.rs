use rand::Rng;
use rand::rngs::StdRng;
use tracing::trace;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::layers::layer::{Layer, LayerParams, Neuron, Predecessor};

#[derive(Debug, Clone)]
pub struct DenseNeuron {
    /// One weight per predecessor neuron; empty on the input layer.
    weights: Vec<f64>,
    /// Multiplies the layer's bias term.
    bias_weight: f64,
    pre_activation: f64,
    output: f64,
}

impl DenseNeuron {
    fn passthrough() -> DenseNeuron {
        DenseNeuron { weights: Vec::new(), bias_weight: 0.0, pre_activation: 0.0, output: 0.0 }
    }

    fn random(fan_in: usize, rng: &mut StdRng) -> DenseNeuron {
        DenseNeuron {
            weights: (0..fan_in).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect(),
            bias_weight: rng.gen::<f64>() * 2.0 - 1.0,
            pre_activation: 0.0,
            output: 0.0,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias_weight(&self) -> f64 {
        self.bias_weight
    }
}

impl Neuron for DenseNeuron {
    fn output(&self) -> f64 {
        self.output
    }
}

/// Fully connected layer: every neuron sees every output of the predecessor.
///
/// The input layer has no weights and copies its raw input through.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    index: usize,
    neurons: Vec<DenseNeuron>,
    previous: Option<Predecessor>,
    bias: f64,
    activation: ActivationFunction,
    /// Raw input on the input layer, the predecessor's last outputs elsewhere.
    inputs: Vec<f64>,
    is_output: bool,
}

impl DenseLayer {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn previous(&self) -> Option<Predecessor> {
        self.previous
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    fn mismatch(&self, expected: usize, actual: usize) -> NetworkError {
        NetworkError::DimensionMismatch { layer: self.index, expected, actual }
    }

    /// Delta-rule update of this layer followed by the predecessor, recursively.
    ///
    /// The error handed down is `sum_i delta_i * w_ij`, taken from the weights
    /// before this layer applies its own update.
    fn propagate(&mut self, errors: &[f64], upstream: &mut [DenseLayer]) -> Result<()> {
        if errors.len() != self.neurons.len() {
            return Err(self.mismatch(self.neurons.len(), errors.len()));
        }
        let prev = match self.previous {
            Some(prev) => prev,
            None => return Ok(()),
        };
        if self.inputs.len() != prev.neuron_count {
            return Err(self.mismatch(prev.neuron_count, self.inputs.len()));
        }

        let activation = self.activation;
        let bias = self.bias;
        let inputs = &self.inputs;
        let mut upstream_errors = vec![0.0; prev.neuron_count];

        for (neuron, &error) in self.neurons.iter_mut().zip(errors) {
            let delta = error * activation.derivative(neuron.pre_activation, neuron.output);
            for ((w, &x), up) in neuron.weights.iter_mut().zip(inputs).zip(upstream_errors.iter_mut()) {
                *up += delta * *w;
                *w -= delta * x;
            }
            neuron.bias_weight -= delta * bias;
        }
        trace!(layer = self.index, "adjusted weights");

        if prev.index >= upstream.len() {
            return Err(NetworkError::Configuration(format!(
                "layer {} cannot reach its predecessor at slot {}",
                self.index, prev.index
            )));
        }
        let (before, rest) = upstream.split_at_mut(prev.index);
        rest[0].propagate(&upstream_errors, before)
    }
}

impl Layer for DenseLayer {
    type Neuron = DenseNeuron;

    fn construct(params: LayerParams, rng: &mut StdRng) -> Result<DenseLayer> {
        let index = params.previous.map_or(0, |p| p.index + 1);
        if params.neuron_count == 0 {
            return Err(NetworkError::Configuration(format!(
                "layer {index} must have at least one neuron"
            )));
        }
        let neurons = match params.previous {
            None => (0..params.neuron_count).map(|_| DenseNeuron::passthrough()).collect(),
            Some(prev) => (0..params.neuron_count)
                .map(|_| DenseNeuron::random(prev.neuron_count, rng))
                .collect(),
        };
        Ok(DenseLayer {
            index,
            neurons,
            previous: params.previous,
            bias: params.bias,
            activation: params.activation,
            inputs: Vec::new(),
            is_output: false,
        })
    }

    fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    fn set_input(&mut self, values: &[f64]) -> Result<()> {
        if self.previous.is_some() {
            return Err(NetworkError::Configuration(format!(
                "layer {} reads its predecessor; raw input only goes to the input layer",
                self.index
            )));
        }
        if values.len() != self.neurons.len() {
            return Err(self.mismatch(self.neurons.len(), values.len()));
        }
        self.inputs.clear();
        self.inputs.extend_from_slice(values);
        Ok(())
    }

    fn think(&mut self, upstream: &[DenseLayer]) -> Result<()> {
        match self.previous {
            None => {
                if self.inputs.len() != self.neurons.len() {
                    return Err(self.mismatch(self.neurons.len(), self.inputs.len()));
                }
                for (neuron, &x) in self.neurons.iter_mut().zip(&self.inputs) {
                    neuron.pre_activation = x;
                    neuron.output = x;
                }
            }
            Some(prev) => {
                let predecessor = upstream.get(prev.index).ok_or_else(|| {
                    NetworkError::Configuration(format!(
                        "layer {} cannot reach its predecessor at slot {}",
                        self.index, prev.index
                    ))
                })?;
                self.inputs.clear();
                self.inputs.extend(predecessor.neurons.iter().map(|n| n.output));
                if self.inputs.len() != prev.neuron_count {
                    return Err(self.mismatch(prev.neuron_count, self.inputs.len()));
                }

                let activation = self.activation;
                let bias = self.bias;
                let inputs = &self.inputs;
                for neuron in &mut self.neurons {
                    let z = neuron.weights.iter().zip(inputs)
                        .map(|(w, x)| w * x)
                        .sum::<f64>() + bias * neuron.bias_weight;
                    neuron.pre_activation = z;
                    neuron.output = activation.function(z);
                }
            }
        }
        Ok(())
    }

    fn neurons(&self) -> &[DenseNeuron] {
        &self.neurons
    }

    fn adjust(&mut self, errors: &[f64], upstream: &mut [DenseLayer]) -> Result<()> {
        if !self.is_output {
            return Err(NetworkError::NotOutputLayer { layer: self.index });
        }
        self.propagate(errors, upstream)
    }

    fn mark_as_output_layer(&mut self) -> Result<()> {
        if self.is_output {
            return Err(NetworkError::AlreadyOutputLayer { layer: self.index });
        }
        self.is_output = true;
        Ok(())
    }

    fn is_output_layer(&self) -> bool {
        self.is_output
    }
}
