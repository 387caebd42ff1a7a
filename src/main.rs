//! simple-nn: train a small feed-forward network on a toy or CSV dataset and
//! print its predictions before and after training.
//!
//! Run with:
//!   cargo run --release -- --layers 2,3,1 --dataset xor --iterations 20000
//!   RUST_LOG=simple_nn=debug cargo run -- --csv data.csv --outputs 1

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use simple_nn::data::{builtin, load_csv, BUILTIN_NAMES};
use simple_nn::{
    ActivationFunction, Dataset, Network, NetworkConfig, TrainConfig, DEFAULT_DECIMAL_PLACES,
    DEFAULT_ITERATIONS,
};

#[derive(Parser, Debug)]
#[command(name = "simple-nn", version, about = "Train a minimal feed-forward network")]
struct Args {
    /// Neuron count per layer, input layer first (e.g. 2,3,1)
    #[arg(long, value_delimiter = ',')]
    layers: Option<Vec<usize>>,

    /// JSON network config; the flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    learning_factor: Option<f64>,

    #[arg(long)]
    bias: Option<f64>,

    /// sigmoid, tanh, identity, relu or leaky_relu
    #[arg(long)]
    activation: Option<String>,

    /// Seed for reproducible weight initialisation
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Built-in dataset (xor, and, or)
    #[arg(long, default_value = "xor", conflicts_with = "csv")]
    dataset: String,

    /// Numeric CSV file; the last --outputs columns are targets
    #[arg(long)]
    csv: Option<PathBuf>,

    #[arg(long, default_value_t = 1)]
    outputs: usize,

    #[arg(long, default_value_t = DEFAULT_DECIMAL_PLACES)]
    decimal_places: u32,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write the effective network config to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}

fn network_config(args: &Args, dataset: &Dataset) -> Result<NetworkConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let path = path.to_string_lossy();
            NetworkConfig::load_json(&path)
                .with_context(|| format!("failed to load network config from {path}"))?
        }
        None => {
            // Size input and output layers from the dataset, with one
            // hidden layer in between.
            let inputs = dataset.input_width().unwrap_or(1);
            let outputs = dataset.output_width().unwrap_or(1);
            NetworkConfig::new(vec![inputs, inputs + 1, outputs])
        }
    };

    if let Some(layers) = &args.layers {
        config.neuron_counts = layers.clone();
    }
    if let Some(learning_factor) = args.learning_factor {
        config.learning_factor = learning_factor;
    }
    if let Some(bias) = args.bias {
        config.bias = bias;
    }
    if let Some(name) = &args.activation {
        config.activation = match ActivationFunction::from_name(name) {
            Some(activation) => activation,
            None => bail!("unknown activation function '{name}'"),
        };
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn load_dataset(args: &Args) -> Result<Dataset> {
    match &args.csv {
        Some(path) => load_csv(path, args.outputs)
            .with_context(|| format!("failed to read dataset {}", path.display())),
        None => match builtin(&args.dataset) {
            Some(dataset) => Ok(dataset),
            None => bail!(
                "unknown dataset '{}'; expected one of {}",
                args.dataset,
                BUILTIN_NAMES.join(", ")
            ),
        },
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let dataset = load_dataset(&args)?;
    let config = network_config(&args, &dataset)?;
    if let Some(path) = &args.save_config {
        config.save_json(&path.to_string_lossy())
            .with_context(|| format!("failed to write config to {}", path.display()))?;
    }

    let mut network = Network::from_config(&config).context("failed to build network")?;
    info!(
        dataset = %dataset.name,
        examples = dataset.len(),
        layers = ?config.neuron_counts,
        "network ready"
    );

    network.print_results(
        &dataset.inputs,
        &dataset.outputs,
        Some("Before training:"),
        args.decimal_places,
    )?;

    let train_config = TrainConfig::new(args.iterations);
    network.train_with(&dataset.inputs, &dataset.outputs, &train_config)?;

    network.print_results(
        &dataset.inputs,
        &dataset.outputs,
        Some("After training:"),
        args.decimal_places,
    )?;

    Ok(())
}
