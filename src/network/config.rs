use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};

pub const DEFAULT_LEARNING_FACTOR: f64 = 0.01;
pub const DEFAULT_BIAS: f64 = 1.0;

fn default_learning_factor() -> f64 {
    DEFAULT_LEARNING_FACTOR
}

fn default_bias() -> f64 {
    DEFAULT_BIAS
}

/// Architecture and hyperparameters of a network.
///
/// Can be saved to / loaded from JSON. Trained weights are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Neuron count per layer, input layer first.
    pub neuron_counts: Vec<usize>,
    /// How strongly a single example's error changes the weights.
    #[serde(default = "default_learning_factor")]
    pub learning_factor: f64,
    /// Constant term handed to every layer.
    #[serde(default = "default_bias")]
    pub bias: f64,
    #[serde(default)]
    pub activation: ActivationFunction,
    /// Seed for weight initialisation; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(neuron_counts: Vec<usize>) -> Self {
        NetworkConfig {
            neuron_counts,
            learning_factor: DEFAULT_LEARNING_FACTOR,
            bias: DEFAULT_BIAS,
            activation: ActivationFunction::default(),
            seed: None,
        }
    }

    pub fn with_learning_factor(mut self, learning_factor: f64) -> Self {
        self.learning_factor = learning_factor;
        self
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects configurations no network can be built from.
    ///
    /// A learning factor of exactly 0 is accepted and freezes the weights.
    pub fn validate(&self) -> Result<()> {
        if self.neuron_counts.is_empty() {
            return Err(NetworkError::Configuration(
                "at least one layer is required".into(),
            ));
        }
        if let Some(pos) = self.neuron_counts.iter().position(|&n| n == 0) {
            return Err(NetworkError::Configuration(format!(
                "layer {pos} must have at least one neuron"
            )));
        }
        if !self.learning_factor.is_finite() || self.learning_factor < 0.0 {
            return Err(NetworkError::Configuration(format!(
                "learning factor must be a finite non-negative number, got {}",
                self.learning_factor
            )));
        }
        if !self.bias.is_finite() {
            return Err(NetworkError::Configuration(format!(
                "bias must be finite, got {}",
                self.bias
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file written by `save_json` or by hand.
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
