use crate::error::{NetworkError, Result};

/// Scaled difference `(a - b) * 2`, the only error metric the trainer uses.
///
/// Antisymmetric and linear in both arguments; `loss(a, a) == 0`.
pub fn loss(a: f64, b: f64) -> f64 {
    (a - b) * 2.0
}

/// Builds the error vector handed to the output layer for one example:
/// `loss(outputs[i], targets[i]) * learning_factor` at every position.
///
/// `layer` is only used to label a dimension mismatch.
pub fn error_signal(
    outputs: &[f64],
    targets: &[f64],
    learning_factor: f64,
    layer: usize,
) -> Result<Vec<f64>> {
    if outputs.len() != targets.len() {
        return Err(NetworkError::DimensionMismatch {
            layer,
            expected: outputs.len(),
            actual: targets.len(),
        });
    }
    Ok(outputs.iter().zip(targets.iter())
        .map(|(&out, &target)| loss(out, target) * learning_factor)
        .collect())
}

/// Mean of `|loss(outputs[i], targets[i])|`; 0 for empty input.
pub fn mean_abs_loss(outputs: &[f64], targets: &[f64]) -> f64 {
    let n = outputs.len().min(targets.len());
    if n == 0 {
        return 0.0;
    }
    outputs.iter().zip(targets.iter())
        .map(|(&a, &b)| loss(a, b).abs())
        .sum::<f64>() / n as f64
}
