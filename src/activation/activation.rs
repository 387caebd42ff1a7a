use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Squashing function applied by every non-input neuron after its weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    Tanh,
    Identity,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "leaky_relu")]
    LeakyReLU { alpha: f64 },
}

impl ActivationFunction {
    /// Applies the activation to a pre-activation value `z`.
    pub fn function(&self, z: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-z)),
            ActivationFunction::Tanh => z.tanh(),
            ActivationFunction::Identity => z,
            ActivationFunction::ReLU => if z > 0.0 { z } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if z > 0.0 { z } else { alpha * z },
        }
    }

    /// Slope of the activation at `z`.
    ///
    /// `output` must be `self.function(z)`; Sigmoid and Tanh reuse it instead
    /// of evaluating the exponential a second time.
    pub fn derivative(&self, z: f64, output: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => output * (1.0 - output),
            ActivationFunction::Tanh => 1.0 - output * output,
            ActivationFunction::Identity => 1.0,
            ActivationFunction::ReLU => if z > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if z > 0.0 { 1.0 } else { *alpha },
        }
    }

    /// Parses the names accepted on the command line and in config files.
    pub fn from_name(name: &str) -> Option<ActivationFunction> {
        match name.to_ascii_lowercase().as_str() {
            "sigmoid" => Some(ActivationFunction::Sigmoid),
            "tanh" => Some(ActivationFunction::Tanh),
            "identity" | "linear" => Some(ActivationFunction::Identity),
            "relu" => Some(ActivationFunction::ReLU),
            "leaky_relu" | "leakyrelu" => Some(ActivationFunction::LeakyReLU { alpha: 0.01 }),
            _ => None,
        }
    }
}
