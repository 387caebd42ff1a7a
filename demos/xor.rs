use simple_nn::{Network, NetworkConfig, TrainConfig};
use simple_nn::data::builtin_xor;

fn main() {
    let dataset = builtin_xor();
    let config = NetworkConfig::new(vec![2, 3, 1])
        .with_learning_factor(0.1)
        .with_seed(7);
    let mut network = Network::from_config(&config).expect("valid network config");

    network
        .print_results(&dataset.inputs, &dataset.outputs, Some("Before training:"), 4)
        .expect("inputs match the input layer");

    let (tx, rx) = std::sync::mpsc::channel();
    let train_config = TrainConfig::new(10_000).with_progress(tx);
    network
        .train_with(&dataset.inputs, &dataset.outputs, &train_config)
        .expect("examples match the network");
    drop(train_config);

    for stats in rx.iter().filter(|s| s.iteration % 1000 == 0) {
        println!("Iteration {}: mean |loss| = {:.6}", stats.iteration, stats.mean_abs_loss);
    }

    network
        .print_results(&dataset.inputs, &dataset.outputs, Some("After training:"), 4)
        .expect("inputs match the input layer");
}
