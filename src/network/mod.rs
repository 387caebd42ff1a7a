pub mod config;
pub mod network;
pub mod report;

pub use config::{NetworkConfig, DEFAULT_BIAS, DEFAULT_LEARNING_FACTOR};
pub use network::Network;
