use std::time::Instant;

use tracing::{debug, info};

use crate::error::{NetworkError, Result};
use crate::layers::layer::Layer;
use crate::loss::scaled_difference::{error_signal, mean_abs_loss};
use crate::network::network::Network;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainConfig;

/// Online training: `config.iterations` repetitions over the examples in the
/// given order, one forward pass and one output-layer adjustment per example.
///
/// Each example sees the weights left by the previous one. Returns a fresh
/// forward pass over every input using the final weights.
///
/// # Errors
/// - `ExampleCountMismatch` if the two example lists differ in length
/// - `DimensionMismatch` if a target does not match the output layer width,
///   or an input does not match the input layer width
///
/// Both are detected before any weight changes.
pub fn train_loop<L: Layer>(
    network: &mut Network<L>,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<Vec<Vec<f64>>> {
    if inputs.len() != targets.len() {
        return Err(NetworkError::ExampleCountMismatch {
            inputs: inputs.len(),
            outputs: targets.len(),
        });
    }
    let input_width = network.input_layer().neuron_count();
    let output_width = network.output_layer().neuron_count();
    let output_index = network.len() - 1;
    for (input, target) in inputs.iter().zip(targets) {
        if input.len() != input_width {
            return Err(NetworkError::DimensionMismatch {
                layer: 0,
                expected: input_width,
                actual: input.len(),
            });
        }
        if target.len() != output_width {
            return Err(NetworkError::DimensionMismatch {
                layer: output_index,
                expected: output_width,
                actual: target.len(),
            });
        }
    }

    let learning_factor = network.learning_factor();
    info!(
        iterations = config.iterations,
        examples = inputs.len(),
        learning_factor,
        "training started"
    );
    let t_start = Instant::now();

    for iteration in 1..=config.iterations {
        let mut total_loss = 0.0;

        for (input, target) in inputs.iter().zip(targets) {
            let output = network.think(input)?;
            total_loss += mean_abs_loss(&output, target);
            let errors = error_signal(&output, target, learning_factor, output_index)?;
            network.adjust_output(&errors)?;
        }

        let mean = if inputs.is_empty() { 0.0 } else { total_loss / inputs.len() as f64 };

        if config.log_every > 0 && iteration % config.log_every == 0 {
            debug!(iteration, mean_abs_loss = mean, "training progress");
        }

        if let Some(ref tx) = config.progress_tx {
            // Progress is observational; a gone receiver does not stop training.
            let _ = tx.send(IterationStats {
                iteration,
                total_iterations: config.iterations,
                mean_abs_loss: mean,
            });
        }
    }

    info!(elapsed_ms = t_start.elapsed().as_millis() as u64, "training finished");

    inputs.iter().map(|input| network.think(input)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use crate::network::config::NetworkConfig;

    fn net(seed: u64) -> Network {
        Network::from_config(
            &NetworkConfig::new(vec![2, 2, 1]).with_learning_factor(0.1).with_seed(seed),
        )
        .unwrap()
    }

    #[test]
    fn mismatched_example_counts_are_rejected() {
        let mut n = net(1);
        let err = n.train(&[vec![1.0, 0.0]], &[], 5).unwrap_err();
        assert!(matches!(err, NetworkError::ExampleCountMismatch { inputs: 1, outputs: 0 }));
    }

    #[test]
    fn target_width_is_checked_before_training() {
        let mut n = net(2);
        let before = n.think(&[1.0, 0.0]).unwrap();
        let err = n
            .train(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[vec![1.0], vec![1.0, 0.0]], 5)
            .unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { layer: 2, expected: 1, actual: 2 }));
        assert_eq!(n.think(&[1.0, 0.0]).unwrap(), before);
    }

    #[test]
    fn input_width_is_checked_before_training() {
        let mut n = net(3);
        let err = n.train(&[vec![1.0]], &[vec![1.0]], 5).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { layer: 0, expected: 2, actual: 1 }));
    }

    #[test]
    fn empty_example_list_returns_no_predictions() {
        let mut n = net(4);
        assert!(n.train(&[], &[], 100).unwrap().is_empty());
    }

    #[test]
    fn one_stats_record_per_iteration() {
        let mut n = net(5);
        let (tx, rx) = mpsc::channel();
        let config = TrainConfig::new(7).with_progress(tx).with_log_every(0);
        n.train_with(&[vec![1.0, 0.0]], &[vec![1.0]], &config).unwrap();
        drop(config);

        let stats: Vec<IterationStats> = rx.iter().collect();
        assert_eq!(stats.len(), 7);
        assert_eq!(stats.first().map(|s| s.iteration), Some(1));
        assert_eq!(stats.last().map(|s| s.iteration), Some(7));
        assert!(stats.iter().all(|s| s.total_iterations == 7 && s.mean_abs_loss >= 0.0));
    }

    #[test]
    fn dropped_receiver_does_not_stop_training() {
        let mut n = net(6);
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let config = TrainConfig::new(3).with_progress(tx);
        let preds = n.train_with(&[vec![0.0, 1.0]], &[vec![0.0]], &config).unwrap();
        assert_eq!(preds.len(), 1);
    }

    #[test]
    fn each_example_sees_the_previous_adjustment() {
        let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let targets = vec![vec![1.0], vec![0.0]];

        let mut trained = net(21);
        let preds = trained.train(&inputs, &targets, 1).unwrap();

        // Same sequence by hand: think, adjust, next example.
        let mut manual = net(21);
        let mut seen = Vec::new();
        for (input, target) in inputs.iter().zip(&targets) {
            let output = manual.think(input).unwrap();
            seen.push(output.clone());
            let errors = error_signal(&output, target, manual.learning_factor(), 2).unwrap();
            manual.adjust_output(&errors).unwrap();
        }
        let expected: Vec<Vec<f64>> = inputs.iter().map(|x| manual.think(x).unwrap()).collect();
        assert_eq!(preds, expected);

        // The second example ran on weights already moved by the first.
        let untouched = net(21).think(&inputs[1]).unwrap();
        assert_ne!(seen[1], untouched);
    }

    #[test]
    fn network_drives_layers_through_the_trait_in_order() {
        recording::take_log();
        let config = NetworkConfig::new(vec![2, 3, 1]).with_learning_factor(0.5).with_seed(0);
        let mut n = Network::<recording::RecordingLayer>::build(&config).unwrap();
        n.train(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[vec![1.0], vec![0.0]], 1).unwrap();

        let forward = ["set0", "think0:0", "think1:1", "think2:2"];
        let mut expected: Vec<&str> = vec!["construct0", "construct1", "construct2", "mark2"];
        expected.extend(forward);
        expected.push("adjust2:2:[-0.75]");
        expected.extend(forward);
        expected.push("adjust2:2:[0.25]");
        // Final predictions, one fresh pass per input.
        expected.extend(forward);
        expected.extend(forward);

        assert_eq!(recording::take_log(), expected);
    }

    #[test]
    fn one_output_adjustment_per_example_per_iteration() {
        let config = NetworkConfig::new(vec![2, 2, 1]).with_seed(0);
        let mut n = Network::<recording::RecordingLayer>::build(&config).unwrap();
        recording::take_log();
        n.train(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[vec![1.0], vec![0.0]], 3).unwrap();

        let adjusts: Vec<String> = recording::take_log()
            .into_iter()
            .filter(|e| e.starts_with("adjust"))
            .collect();
        assert_eq!(adjusts.len(), 6);
        assert!(adjusts.iter().all(|e| e.starts_with("adjust2:")));
    }

    #[test]
    fn zero_iterations_never_adjusts() {
        let config = NetworkConfig::new(vec![2, 1]).with_seed(0);
        let mut n = Network::<recording::RecordingLayer>::build(&config).unwrap();
        recording::take_log();
        n.train(&[vec![1.0, 0.0]], &[vec![1.0]], 0).unwrap();
        assert_eq!(recording::take_log(), vec!["set0", "think0:0", "think1:1"]);
    }

    /// Layer that logs every call the network makes on it.
    ///
    /// The input layer echoes its input; later layers always report
    /// `FIXED_OUTPUT`.
    mod recording {
        use std::cell::RefCell;

        use rand::rngs::StdRng;

        use crate::error::Result;
        use crate::layers::layer::{Layer, LayerParams, Neuron};

        pub const FIXED_OUTPUT: f64 = 0.25;

        thread_local! {
            static LOG: RefCell<Vec<String>> = RefCell::new(Vec::new());
        }

        fn record(event: String) {
            LOG.with(|log| log.borrow_mut().push(event));
        }

        pub fn take_log() -> Vec<String> {
            LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
        }

        pub struct RecordedNeuron(f64);

        impl Neuron for RecordedNeuron {
            fn output(&self) -> f64 {
                self.0
            }
        }

        pub struct RecordingLayer {
            index: usize,
            neurons: Vec<RecordedNeuron>,
            input: Vec<f64>,
            is_output: bool,
        }

        impl Layer for RecordingLayer {
            type Neuron = RecordedNeuron;

            fn construct(params: LayerParams, _rng: &mut StdRng) -> Result<Self> {
                let index = params.previous.map_or(0, |p| p.index + 1);
                record(format!("construct{index}"));
                Ok(RecordingLayer {
                    index,
                    neurons: (0..params.neuron_count).map(|_| RecordedNeuron(0.0)).collect(),
                    input: Vec::new(),
                    is_output: false,
                })
            }

            fn neuron_count(&self) -> usize {
                self.neurons.len()
            }

            fn set_input(&mut self, values: &[f64]) -> Result<()> {
                record(format!("set{}", self.index));
                self.input = values.to_vec();
                Ok(())
            }

            fn think(&mut self, upstream: &[Self]) -> Result<()> {
                record(format!("think{}:{}", self.index, upstream.len()));
                if self.index == 0 {
                    for (neuron, &x) in self.neurons.iter_mut().zip(&self.input) {
                        neuron.0 = x;
                    }
                } else {
                    for neuron in &mut self.neurons {
                        neuron.0 = FIXED_OUTPUT;
                    }
                }
                Ok(())
            }

            fn neurons(&self) -> &[RecordedNeuron] {
                &self.neurons
            }

            fn adjust(&mut self, errors: &[f64], upstream: &mut [Self]) -> Result<()> {
                record(format!("adjust{}:{}:{:?}", self.index, upstream.len(), errors));
                Ok(())
            }

            fn mark_as_output_layer(&mut self) -> Result<()> {
                record(format!("mark{}", self.index));
                self.is_output = true;
                Ok(())
            }

            fn is_output_layer(&self) -> bool {
                self.is_output
            }
        }
    }
}
