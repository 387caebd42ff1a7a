use std::sync::mpsc;

use crate::train::iteration_stats::IterationStats;

pub const DEFAULT_ITERATIONS: usize = 10_000;
const DEFAULT_LOG_EVERY: usize = 1_000;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `iterations`  — repetitions over the full example list
/// - `log_every`   — emit a `debug!` progress line every this many
///                   repetitions; `0` disables it
/// - `progress_tx` — optional channel sender; one `IterationStats` is sent per
///                   repetition. A dropped receiver is ignored and training
///                   runs to completion.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub iterations: usize,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(iterations: usize) -> Self {
        TrainConfig {
            iterations,
            log_every: DEFAULT_LOG_EVERY,
            progress_tx: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<IterationStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(DEFAULT_ITERATIONS)
    }
}
