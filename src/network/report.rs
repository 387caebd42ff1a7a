use std::fmt::Write;

use crate::error::{NetworkError, Result};
use crate::layers::layer::Layer;
use crate::network::network::Network;

pub const DEFAULT_DECIMAL_PLACES: u32 = 10;

/// Rounds to `decimal_places`, ties to even.
fn round_to(value: f64, decimal_places: u32) -> f64 {
    let scale = 10f64.powi(decimal_places as i32);
    (value * scale).round_ties_even() / scale
}

impl<L: Layer> Network<L> {
    /// Renders one row per example with its input, desired output and the
    /// network's current prediction rounded to `decimal_places`.
    pub fn format_results(
        &mut self,
        input_values: &[Vec<f64>],
        output_values: &[Vec<f64>],
        label: Option<&str>,
        decimal_places: u32,
    ) -> Result<String> {
        if input_values.len() != output_values.len() {
            return Err(NetworkError::ExampleCountMismatch {
                inputs: input_values.len(),
                outputs: output_values.len(),
            });
        }
        let mut out = String::new();
        if let Some(label) = label {
            out.push_str(label);
            out.push('\n');
        }
        for (inputs, outputs) in input_values.iter().zip(output_values) {
            let prediction: Vec<f64> = self.think(inputs)?
                .into_iter()
                .map(|x| round_to(x, decimal_places))
                .collect();
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "Input: {inputs:?}   Output: {outputs:?}   Prediction: {prediction:?}"
            );
        }
        Ok(out)
    }

    pub fn print_results(
        &mut self,
        input_values: &[Vec<f64>],
        output_values: &[Vec<f64>],
        label: Option<&str>,
        decimal_places: u32,
    ) -> Result<()> {
        let text = self.format_results(input_values, output_values, label, decimal_places)?;
        print!("{text}");
        Ok(())
    }
}
