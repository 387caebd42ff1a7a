use serde::{Serialize, Deserialize};

/// Statistics emitted by `train_loop` after every repetition over the examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based repetition number.
    pub iteration: usize,
    pub total_iterations: usize,
    /// Mean of `|loss(output, target)|` over every output of every example,
    /// measured on the forward passes made during this repetition.
    pub mean_abs_loss: f64,
}
