use rand::Rng;

use crate::{ProviderError, Reply};

/// Supplies the fraction of a phase's maximum step applied on each tick.
pub trait ProgressSource: Send + Sync {
    /// Returns a value in `(0, 1]`.
    fn roll(&self) -> f64;
}

/// Uniform rolls from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomProgressSource;

impl ProgressSource for RandomProgressSource {
    fn roll(&self) -> f64 {
        // `random` is in [0, 1); flip it so zero is never produced.
        1.0 - rand::rng().random::<f64>()
    }
}

/// Always returns the same roll. Useful for deterministic runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedProgressSource(pub f64);

impl ProgressSource for FixedProgressSource {
    fn roll(&self) -> f64 {
        self.0
    }
}

/// Produces the answer for a chat exchange.
#[async_trait::async_trait]
pub trait ResponseProvider: Send + Sync {
    async fn respond(&self, prompt: &str) -> Result<Reply, ProviderError>;
}
