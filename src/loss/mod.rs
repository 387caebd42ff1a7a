pub mod scaled_difference;

pub use scaled_difference::{loss, error_signal, mean_abs_loss};
