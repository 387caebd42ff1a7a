use simple_nn::data::builtin_xor;
use simple_nn::{loss, Network, NetworkConfig};

fn seeded(counts: &[usize], learning_factor: f64, seed: u64) -> Network {
    let config = NetworkConfig::new(counts.to_vec())
        .with_learning_factor(learning_factor)
        .with_seed(seed);
    Network::from_config(&config).unwrap()
}

fn predictions(net: &mut Network, inputs: &[Vec<f64>]) -> Vec<Vec<f64>> {
    inputs.iter().map(|x| net.think(x).unwrap()).collect()
}

#[test]
fn test_zero_iterations_returns_pretraining_predictions() {
    let ds = builtin_xor();
    let mut net = seeded(&[2, 2, 1], 0.1, 1);
    let before = predictions(&mut net, &ds.inputs);

    let returned = net.train(&ds.inputs, &ds.outputs, 0).unwrap();
    assert_eq!(returned, before);
    assert_eq!(predictions(&mut net, &ds.inputs), before);
}

#[test]
fn test_zero_iteration_readback_matches_last_training_result() {
    let ds = builtin_xor();
    let mut net = seeded(&[2, 3, 1], 0.1, 2);
    let trained = net.train(&ds.inputs, &ds.outputs, 500).unwrap();
    let readback = net.train(&ds.inputs, &ds.outputs, 0).unwrap();
    assert_eq!(trained, readback);
}

#[test]
fn test_training_changes_weights() {
    let ds = builtin_xor();
    let mut net = seeded(&[2, 2, 1], 0.1, 3);
    let before = predictions(&mut net, &ds.inputs);
    let after = net.train(&ds.inputs, &ds.outputs, 10).unwrap();
    assert_ne!(before, after);
}

#[test]
fn test_single_example_error_does_not_grow() {
    let input = vec![1.0, 0.0];
    let target = 1.0;
    let mut net = seeded(&[2, 2, 1], 0.1, 4);

    let before = loss(net.think(&input).unwrap()[0], target).abs();
    net.train(&[input.clone()], &[vec![target]], 100).unwrap();
    let after = loss(net.think(&input).unwrap()[0], target).abs();

    assert!(after <= before, "error grew from {before} to {after}");
}

#[test]
fn test_zero_learning_factor_freezes_weights() {
    let ds = builtin_xor();
    let mut net = seeded(&[2, 3, 1], 0.0, 5);
    let before = predictions(&mut net, &ds.inputs);
    let after = net.train(&ds.inputs, &ds.outputs, 1000).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_predictions_follow_input_order() {
    let ds = builtin_xor();
    let mut net = seeded(&[2, 2, 1], 0.1, 6);
    let preds = net.train(&ds.inputs, &ds.outputs, 50).unwrap();
    assert_eq!(preds.len(), ds.inputs.len());
    for (input, pred) in ds.inputs.iter().zip(&preds) {
        assert_eq!(&net.think(input).unwrap(), pred);
    }
}

#[test]
fn test_learns_or_gate() {
    let ds = simple_nn::data::builtin_or();
    let mut net = seeded(&[2, 3, 1], 0.5, 7);
    let preds = net.train(&ds.inputs, &ds.outputs, 5_000).unwrap();
    for (pred, target) in preds.iter().zip(&ds.outputs) {
        assert!((pred[0] - target[0]).abs() < 0.2, "prediction {pred:?} for target {target:?}");
    }
}
